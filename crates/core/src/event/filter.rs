//! Composable event filters.

use super::types::NodeResource;

/// Predicate over the node carried by an event.
///
/// Filters combine left to right, so
/// `EventFilter::is_file().and(a).or(b)` reads as `(is_file AND a) OR b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventFilter {
    /// The node is a file.
    IsFile,
    /// The node's declared MIME type equals the given value.
    MimeType(String),
    /// Both filters accept.
    And(Box<EventFilter>, Box<EventFilter>),
    /// Either filter accepts.
    Or(Box<EventFilter>, Box<EventFilter>),
}

impl EventFilter {
    /// Accept file nodes.
    #[must_use]
    pub fn is_file() -> Self {
        Self::IsFile
    }

    /// Accept nodes with the given MIME type.
    #[must_use]
    pub fn mime_type(mime_type: impl Into<String>) -> Self {
        Self::MimeType(mime_type.into())
    }

    /// Combine with `other`, requiring both.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    /// Combine with `other`, requiring either.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    /// Evaluate the filter against a node.
    #[must_use]
    pub fn test(&self, resource: &NodeResource) -> bool {
        match self {
            Self::IsFile => resource.is_file,
            Self::MimeType(expected) => resource.mime_type() == Some(expected.as_str()),
            Self::And(left, right) => left.test(resource) && right.test(resource),
            Self::Or(left, right) => left.test(resource) || right.test(resource),
        }
    }
}
