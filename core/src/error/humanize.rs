use thiserror::Error;

/// Failure kinds of a single humanize request.
///
/// `Display` is the exact message printed after `Error: ` on stderr.
#[derive(Error, Debug)]
pub enum HumanizeError {
    #[error("{0}")]
    Input(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("Humanizer processing failed: {0}")]
    Processing(String),

    #[error("Failed to output result: {0}")]
    Output(String),
}

/// Errors raised by a backend; the processor folds them into [`HumanizeError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Failed(String),
}

impl From<BackendError> for HumanizeError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Unavailable(msg) => HumanizeError::Unavailable(msg),
            BackendError::Failed(msg) => HumanizeError::Processing(msg),
        }
    }
}

impl HumanizeError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Input(_) => "input",
            Self::Validation(_) => "validation",
            Self::Unavailable(_) => "unavailable",
            Self::Processing(_) => "processing",
            Self::Output(_) => "output",
        }
    }
}
