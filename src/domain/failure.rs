use serde_json::Value;
use std::fmt;

/// Classification of a failed API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Server-side fault (5xx). The raw body is never surfaced for this
    /// class; the user sees a fixed generic message.
    Internal,
    /// The server rejected the request (validation or client error). The
    /// server-supplied message and payload are surfaced verbatim.
    Rejected,
    /// No response was received at all.
    Network,
    /// A response arrived but its body did not match the expected shape.
    Malformed,
}

/// The failure value carried by a `Signal::Failed` and returned to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiFailure {
    pub kind: FailureKind,
    /// User-facing message for this failure.
    pub message: String,
    /// Server error body, verbatim, when one was received and parsed.
    pub payload: Option<Value>,
}

impl ApiFailure {
    pub const INTERNAL_MESSAGE: &'static str = "Sorry, an unexpected error occurred.";
    pub const NETWORK_MESSAGE: &'static str = "Could not reach the server. Please try again.";
    pub const MALFORMED_MESSAGE: &'static str = "The server returned an unexpected response.";

    pub fn internal() -> Self {
        Self {
            kind: FailureKind::Internal,
            message: Self::INTERNAL_MESSAGE.to_string(),
            payload: None,
        }
    }

    pub fn network() -> Self {
        Self {
            kind: FailureKind::Network,
            message: Self::NETWORK_MESSAGE.to_string(),
            payload: None,
        }
    }

    pub fn malformed() -> Self {
        Self {
            kind: FailureKind::Malformed,
            message: Self::MALFORMED_MESSAGE.to_string(),
            payload: None,
        }
    }

    pub fn rejected(message: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: FailureKind::Rejected,
            message: message.into(),
            payload: Some(payload),
        }
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
