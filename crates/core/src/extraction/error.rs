//! Extraction error types.

use thiserror::Error;

use crate::mail::MailError;
use crate::repository::RepositoryError;

/// Reasons an extraction run stopped early.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The node has no primary parent to create the folder under.
    #[error("node {node_id} has no parent in its primary hierarchy")]
    MissingParent {
        /// Source node id.
        node_id: String,
    },

    /// The message content could not be downloaded.
    #[error("failed to download content: {0}")]
    Download(#[source] RepositoryError),

    /// The downloaded content is not a usable multipart message.
    #[error("failed to read message: {0}")]
    Parse(#[from] MailError),

    /// A part disposed as attachment carries no file name.
    #[error("attachment in part {part} has no file name")]
    MissingFileName {
        /// Zero-based index of the part in the message.
        part: usize,
    },

    /// A create, upload or associate call failed.
    #[error("failed to {operation}: {source}")]
    Repository {
        /// What was being attempted.
        operation: &'static str,
        /// Underlying repository error.
        #[source]
        source: RepositoryError,
    },
}

impl ExtractionError {
    /// Create a missing parent error.
    #[must_use]
    pub fn missing_parent(node_id: impl Into<String>) -> Self {
        Self::MissingParent {
            node_id: node_id.into(),
        }
    }

    /// Wrap a repository error with the operation that raised it.
    #[must_use]
    pub fn repository(operation: &'static str, source: RepositoryError) -> Self {
        Self::Repository { operation, source }
    }
}
