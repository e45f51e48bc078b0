use thiserror::Error;

use super::humanize::HumanizeError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Humanize(#[from] HumanizeError),
    #[error("command failed: {0}")]
    Command(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

impl CliError {
    /// Every failure leaves the process with status 1.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
