//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `humanizer_core::api` instead of reaching into internal modules.

pub use crate::config::{
    load_default, AppConfig, BackendConfig, CommandBackendConfig, HttpBackendConfig,
    InputProtocol, LoggingConfig,
};
pub use crate::error::{BackendError, CliError, HumanizeError};
pub use crate::humanizer::{stringify_result, Humanizer};
pub use crate::processor::{process, read_input, transform, validate, write_output, HumanizeResponse};
pub use crate::request::{HumanizeRequest, Strength};
pub use crate::util::{parse_version, Version};
