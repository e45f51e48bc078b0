#[allow(clippy::module_inception)]
pub mod error;
pub mod humanize;

pub use error::CliError;
pub use humanize::{BackendError, HumanizeError};
