//! # HTTP Routes
//!
//! Route table for the Club API, versioned under `/v1`:
//!
//! ```text
//! GET/POST         /v1/members
//! GET/PUT/PATCH/DELETE /v1/members/:member_id
//! GET/POST         /v1/events
//! GET              /v1/events/upcoming
//! GET              /v1/events/available?member_id=
//! GET              /v1/events/registered?member_id=
//! GET/PUT/DELETE   /v1/events/:event_id
//! GET/POST/DELETE  /v1/events/:event_id/registration
//! GET/POST         /v1/locations
//! GET/POST         /v1/types
//! GET/POST         /v1/info
//! GET              /healthz
//! ```
//!
//! Handlers stay thin: extract, delegate to a service, serialize.

pub mod events;
pub mod members;
pub mod reference;
pub mod registrations;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .nest("/v1/members", members::router())
        .nest("/v1/events", events::router())
        .nest("/v1/locations", reference::locations_router())
        .nest("/v1/types", reference::event_types_router())
        .nest("/v1/info", reference::info_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Pool liveness probe.
async fn health(State(state): State<AppState>) -> StatusCode {
    if state.db.health_check().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
