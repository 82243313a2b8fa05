//! Content repository error types.

use thiserror::Error;

/// Content repository operation errors.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The request never produced a response (connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The repository answered with a non-success status.
    #[error("repository returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error summary from the response body, or the reason phrase.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("invalid repository response: {0}")]
    Decode(String),

    /// Downloaded content exceeded the configured limit.
    #[error("content exceeds limit of {limit} bytes")]
    ContentTooLarge {
        /// Configured maximum in bytes.
        limit: u64,
    },
}

impl RepositoryError {
    /// Create a transport error.
    #[must_use]
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Create a decode error.
    #[must_use]
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// HTTP status of a status error.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
