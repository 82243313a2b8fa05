//! Repository request and response bodies.

use serde::{Deserialize, Serialize};

/// Generic folder node type.
pub const CM_FOLDER: &str = "cm:folder";
/// Generic content node type.
pub const CM_CONTENT: &str = "cm:content";
/// Association from a message to one of its attachments.
pub const IMAP_ATTACHMENT: &str = "imap:attachment";
/// Association from a message to its attachments folder.
pub const IMAP_ATTACHMENTS_FOLDER: &str = "imap:attachmentsFolder";

/// Body for creating a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeBodyCreate {
    /// Node name.
    pub name: String,
    /// Content model type.
    pub node_type: String,
}

impl NodeBodyCreate {
    /// A `cm:folder` node.
    #[must_use]
    pub fn folder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: CM_FOLDER.to_string(),
        }
    }

    /// A `cm:content` node.
    #[must_use]
    pub fn content(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: CM_CONTENT.to_string(),
        }
    }
}

/// Body for creating an association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationBody {
    /// Target node id.
    pub target_id: String,
    /// Association type.
    pub assoc_type: String,
}

impl AssociationBody {
    /// An `imap:attachment` association to `target_id`.
    #[must_use]
    pub fn attachment(target_id: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            assoc_type: IMAP_ATTACHMENT.to_string(),
        }
    }

    /// An `imap:attachmentsFolder` association to `target_id`.
    #[must_use]
    pub fn attachments_folder(target_id: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            assoc_type: IMAP_ATTACHMENTS_FOLDER.to_string(),
        }
    }
}

/// A node as returned by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Node id.
    pub id: String,
    /// Node name.
    #[serde(default)]
    pub name: String,
    /// Content model type.
    #[serde(default)]
    pub node_type: String,
    /// Containing node id.
    #[serde(default)]
    pub parent_id: Option<String>,
}
