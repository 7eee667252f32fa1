use crate::domain::failure::ApiFailure;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// An API operation failed. The failure has already been dispatched to
    /// the store and surfaced to the notifier by the time this is returned.
    #[error("API request failed: {0}")]
    ApiError(ApiFailure),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl ClientError {
    /// The classified failure, when this error came out of an API operation.
    pub fn as_api_failure(&self) -> Option<&ApiFailure> {
        match self {
            ClientError::ApiError(failure) => Some(failure),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
