//! Email attachment extraction.
//!
//! This module provides the workflow run for each newly created email node:
//! - Download and parse the message
//! - Create an attachments folder beside it
//! - Upload each attachment part into that folder
//! - Link folder and attachments back to the message

mod error;
mod service;

pub use error::ExtractionError;
pub use service::{AttachmentExtractor, MIME_OUTLOOK, MIME_RFC822, strip_extension};
