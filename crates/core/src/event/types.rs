//! Repository event types and data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event type discriminator carried in the `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    /// A node was created.
    NodeCreated,
    /// A node was updated.
    NodeUpdated,
    /// A node was deleted.
    NodeDeleted,
    /// Any other event type, kept verbatim.
    Other(String),
}

impl EventType {
    /// Wire value of the event type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::NodeCreated => "org.alfresco.event.node.Created",
            Self::NodeUpdated => "org.alfresco.event.node.Updated",
            Self::NodeDeleted => "org.alfresco.event.node.Deleted",
            Self::Other(s) => s,
        }
    }

    /// Parse from the wire value.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "org.alfresco.event.node.Created" => Self::NodeCreated,
            "org.alfresco.event.node.Updated" => Self::NodeUpdated,
            "org.alfresco.event.node.Deleted" => Self::NodeDeleted,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for EventType {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<EventType> for String {
    fn from(t: EventType) -> Self {
        t.as_str().to_string()
    }
}

/// A repository event envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoEvent {
    /// Envelope format version.
    #[serde(default)]
    pub specversion: Option<String>,
    /// Event type.
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Event identifier.
    pub id: String,
    /// Event source.
    #[serde(default)]
    pub source: Option<String>,
    /// When the event was raised.
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
    /// Content type of `data`.
    #[serde(default)]
    pub datacontenttype: Option<String>,
    /// Event payload.
    pub data: EventData,
}

impl RepoEvent {
    /// The node the event is about.
    #[must_use]
    pub fn resource(&self) -> &NodeResource {
        &self.data.resource
    }
}

/// Event payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventData {
    /// Groups events raised by the same repository transaction.
    #[serde(default)]
    pub event_group_id: Option<String>,
    /// The affected node.
    pub resource: NodeResource,
}

/// Content metadata of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentInfo {
    /// Declared MIME type.
    pub mime_type: String,
    /// Content size in bytes.
    #[serde(default)]
    pub size_in_bytes: Option<u64>,
    /// Character encoding.
    #[serde(default)]
    pub encoding: Option<String>,
}

/// The node an event refers to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeResource {
    /// Node identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Content model type (e.g. `cm:content`).
    #[serde(default)]
    pub node_type: Option<String>,
    /// Whether the node is a file.
    #[serde(default)]
    pub is_file: bool,
    /// Whether the node is a folder.
    #[serde(default)]
    pub is_folder: bool,
    /// Content metadata, absent for nodes without content.
    #[serde(default)]
    pub content: Option<ContentInfo>,
    /// Ancestor ids, nearest first.
    #[serde(default)]
    pub primary_hierarchy: Vec<String>,
    /// Applied aspects.
    #[serde(default)]
    pub aspect_names: Vec<String>,
}

impl NodeResource {
    /// Declared MIME type, if the node has content.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        self.content.as_ref().map(|c| c.mime_type.as_str())
    }

    /// Nearest ancestor (the containing folder).
    #[must_use]
    pub fn parent_id(&self) -> Option<&str> {
        self.primary_hierarchy.first().map(String::as_str)
    }
}
