//! Event endpoints, including the nested registration resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::routes::registrations;
use crate::AppState;
use clubhouse_core::{Event, EventFilter, NewEvent};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/upcoming", get(upcoming_events))
        .route("/available", get(available_events))
        .route("/registered", get(registered_events))
        .route(
            "/:event_id",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route(
            "/:event_id/registration",
            get(registrations::check_registration)
                .post(registrations::register)
                .delete(registrations::cancel),
        )
}

/// Identifies the member acting on a member-scoped listing.
#[derive(Debug, Deserialize)]
pub struct MemberQuery {
    pub member_id: String,
}

#[derive(Debug, Serialize)]
struct EventCreated {
    id: i64,
}

async fn create_event(
    State(state): State<AppState>,
    Json(body): Json<NewEvent>,
) -> Result<(StatusCode, Json<EventCreated>), ApiError> {
    let id = state.events.add(&body).await?;
    Ok((StatusCode::CREATED, Json(EventCreated { id })))
}

async fn list_events(
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let events = state.events.list(&filter).await?;
    Ok(Json(events))
}

async fn upcoming_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let events = state.events.upcoming().await?;
    Ok(Json(events))
}

async fn available_events(
    State(state): State<AppState>,
    Query(query): Query<MemberQuery>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let events = state.events.available(&query.member_id).await?;
    Ok(Json(events))
}

async fn registered_events(
    State(state): State<AppState>,
    Query(query): Query<MemberQuery>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let events = state.events.registered(&query.member_id).await?;
    Ok(Json(events))
}

async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<Event>, ApiError> {
    let event = state.events.get(event_id).await?;
    Ok(Json(event))
}

async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    Json(body): Json<NewEvent>,
) -> Result<StatusCode, ApiError> {
    state.events.update(event_id, &body).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.events.delete(event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
