use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// An input violated its documented domain, e.g. a negative price or a
    /// duplicated backer.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A text generation provider failed or returned an unusable reply
    #[error("Provider error: {0}")]
    Provider(String),

    /// Error from JSON serialization of prompt payloads
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ComputeError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ComputeError::InvalidArgument(message.into())
    }

    /// Returns true when the error was caused by the caller's input.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ComputeError::InvalidArgument(_))
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
