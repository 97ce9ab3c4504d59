//! Error types for the backend client

use thiserror::Error;

/// Result type alias for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Failure of a single backend call
///
/// Callers above the transport only observe success or failure; the variants
/// exist for logging.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced a response (connect failure, timeout, reset)
    #[error("backend unreachable: {0}")]
    NetworkUnreachable(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status
    #[error("server error (status {status}): {message}")]
    ServerError {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// The response body did not match the expected schema
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl TransportError {
    /// Create a server error from status code and body
    pub fn server_error(status: u16, message: impl Into<String>) -> Self {
        Self::ServerError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ServerError { status, .. } if *status >= 500)
    }
}
