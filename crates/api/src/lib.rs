//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - The event intake webhook that feeds the event dispatcher
//! - Health check
//! - JSON error responses

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use mailex_core::event::{EventDispatcher, EventHandler};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
pub struct AppState<H: EventHandler> {
    /// Dispatcher wrapping the registered event handler.
    pub dispatcher: Arc<EventDispatcher<H>>,
}

impl<H: EventHandler> AppState<H> {
    /// Create state around a dispatcher.
    #[must_use]
    pub fn new(dispatcher: EventDispatcher<H>) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }
}

impl<H: EventHandler> Clone for AppState<H> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

/// Creates the main application router.
pub fn create_router<H: EventHandler + 'static>(state: AppState<H>) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes::<H>())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
