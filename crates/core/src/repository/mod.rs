//! Content repository contract.
//!
//! The workflow talks to the repository only through [`ContentRepository`].
//! The client crate implements it over the REST API; tests implement it in
//! memory.

mod error;
mod types;

use std::future::Future;

use bytes::Bytes;

pub use error::RepositoryError;
pub use types::{
    AssociationBody, CM_CONTENT, CM_FOLDER, IMAP_ATTACHMENT, IMAP_ATTACHMENTS_FOLDER, Node,
    NodeBodyCreate,
};

/// Remote operations on content nodes and associations.
pub trait ContentRepository: Send + Sync {
    /// Download a node's content.
    fn get_content(
        &self,
        node_id: &str,
    ) -> impl Future<Output = Result<Bytes, RepositoryError>> + Send;

    /// Create a child node under `parent_id`.
    fn create_node(
        &self,
        parent_id: &str,
        body: &NodeBodyCreate,
    ) -> impl Future<Output = Result<Node, RepositoryError>> + Send;

    /// Replace a node's content.
    fn update_node_content(
        &self,
        node_id: &str,
        content: Bytes,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Create a typed association from `source_id`.
    fn create_association(
        &self,
        source_id: &str,
        body: &AssociationBody,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}
