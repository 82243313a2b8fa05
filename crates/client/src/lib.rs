//! REST client for the content repository.
//!
//! [`NodesClient`] implements [`mailex_core::repository::ContentRepository`]
//! over the repository's public nodes API using HTTP basic auth.

mod nodes;

pub use nodes::NodesClient;
