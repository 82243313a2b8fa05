//! API route definitions.

use axum::Router;
use mailex_core::event::EventHandler;

use crate::AppState;

pub mod events;
pub mod health;

/// Creates the API router with all routes.
pub fn api_routes<H: EventHandler + 'static>() -> Router<AppState<H>> {
    Router::new()
        .merge(health::routes::<H>())
        .merge(events::routes::<H>())
}
