//! Repository events: wire model, filters and dispatch.
//!
//! Events are delivered by an external event source (see the api crate's
//! intake route). The dispatcher checks the event type, applies the
//! handler's [`EventFilter`], and only then invokes the handler.

mod dispatch;
mod filter;
mod types;

pub use dispatch::{DispatchOutcome, EventDispatcher, EventHandler};
pub use filter::EventFilter;
pub use types::{ContentInfo, EventData, EventType, NodeResource, RepoEvent};
