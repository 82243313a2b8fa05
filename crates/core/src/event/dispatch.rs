//! Routing events to a handler.

use std::future::Future;

use tracing::debug;

use super::filter::EventFilter;
use super::types::{EventType, RepoEvent};

/// A handler for one type of repository event.
pub trait EventHandler: Send + Sync {
    /// Event type this handler reacts to.
    fn event_type(&self) -> EventType;

    /// Filter an event's node must pass before the handler runs.
    fn event_filter(&self) -> EventFilter;

    /// Handle an event that passed the type check and the filter.
    ///
    /// Failures are the handler's to report; nothing is returned to the
    /// event source.
    fn handle_event(&self, event: &RepoEvent) -> impl Future<Output = ()> + Send;
}

/// What the dispatcher did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The handler ran (whether or not its work succeeded).
    Handled,
    /// The event type or the filter did not match.
    Ignored,
}

impl DispatchOutcome {
    /// Status string for API responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Handled => "handled",
            Self::Ignored => "ignored",
        }
    }
}

/// Delivers events to a single handler.
pub struct EventDispatcher<H: EventHandler> {
    handler: H,
    event_type: EventType,
    filter: EventFilter,
}

impl<H: EventHandler> EventDispatcher<H> {
    /// Create a dispatcher, capturing the handler's type and filter once.
    #[must_use]
    pub fn new(handler: H) -> Self {
        let event_type = handler.event_type();
        let filter = handler.event_filter();
        Self {
            handler,
            event_type,
            filter,
        }
    }

    /// The wrapped handler.
    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Dispatch one event.
    pub async fn dispatch(&self, event: &RepoEvent) -> DispatchOutcome {
        if event.event_type != self.event_type {
            debug!(
                event_id = %event.id,
                event_type = event.event_type.as_str(),
                "Ignoring event of unhandled type"
            );
            return DispatchOutcome::Ignored;
        }

        if !self.filter.test(event.resource()) {
            debug!(
                event_id = %event.id,
                node = %event.resource().name,
                mime_type = event.resource().mime_type().unwrap_or("-"),
                "Event rejected by filter"
            );
            return DispatchOutcome::Ignored;
        }

        self.handler.handle_event(event).await;
        DispatchOutcome::Handled
    }
}
