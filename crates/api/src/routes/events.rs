//! Event intake route.
//!
//! The event source delivers repository events here as CloudEvents JSON.
//! Each event is dispatched before the response is sent.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::post,
};
use mailex_core::event::{EventHandler, RepoEvent};
use mailex_shared::AppError;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{AppState, error::ApiError};

/// Creates the event intake routes.
pub fn routes<H: EventHandler + 'static>() -> Router<AppState<H>> {
    Router::new().route("/events", post(receive_event::<H>))
}

/// Response for an accepted event.
#[derive(Debug, Serialize)]
pub struct EventAccepted {
    /// `handled` or `ignored`.
    pub status: &'static str,
}

/// POST `/events`
async fn receive_event<H: EventHandler + 'static>(
    State(state): State<AppState<H>>,
    payload: Result<Json<RepoEvent>, JsonRejection>,
) -> Result<(StatusCode, Json<EventAccepted>), ApiError> {
    let Json(event) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected malformed event");
        AppError::Validation(rejection.body_text())
    })?;

    debug!(
        event_id = %event.id,
        event_type = event.event_type.as_str(),
        node = %event.resource().name,
        "Event received"
    );
    let outcome = state.dispatcher.dispatch(&event).await;

    Ok((
        StatusCode::ACCEPTED,
        Json(EventAccepted {
            status: outcome.as_str(),
        }),
    ))
}
