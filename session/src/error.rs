//! Errors produced by backend calls.

use wire::ErrorBody;

/// Failure of a single request/response exchange.
///
/// Variants map onto the error taxonomy callers branch on: transport failures
/// and non-2xx statuses are passed through unchanged, decode/encode failures
/// mean the JSON did not match the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (network, CORS, DNS).
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("request failed with status {status}: {}", .body.message.as_deref().unwrap_or("no message"))]
    Status { status: u16, body: ErrorBody },

    /// A 2xx response body could not be deserialized.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The request body could not be serialized.
    #[error("request encode failed: {0}")]
    Encode(String),
}

impl ApiError {
    /// Whether this is a 401 from the backend.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }

    /// HTTP status, if the backend answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Backend-provided message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => body.message.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;
