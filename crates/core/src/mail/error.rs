//! Mail parsing error types.

use thiserror::Error;

/// Errors raised while decomposing a message.
#[derive(Debug, Error)]
pub enum MailError {
    /// The bytes could not be parsed as a message.
    #[error("failed to parse message: {0}")]
    Parse(String),

    /// The top-level entity is not a multipart container.
    #[error("message is not multipart (content type '{mime_type}')")]
    NotMultipart {
        /// Content type of the top-level entity.
        mime_type: String,
    },

    /// The multipart container has no boundary or no delimited parts.
    #[error("malformed multipart message: {0}")]
    MalformedMultipart(String),

    /// A body part's transfer encoding could not be decoded.
    #[error("failed to decode body part: {0}")]
    Body(String),
}

impl MailError {
    /// Create a not-multipart error.
    #[must_use]
    pub fn not_multipart(mime_type: impl Into<String>) -> Self {
        Self::NotMultipart {
            mime_type: mime_type.into(),
        }
    }

    /// Create a malformed multipart error.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedMultipart(reason.into())
    }
}

impl From<mailparse::MailParseError> for MailError {
    fn from(err: mailparse::MailParseError) -> Self {
        Self::Parse(err.to_string())
    }
}
