//! Reference-data endpoints: locations, event types, club info.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;
use clubhouse_core::{ClubInfo, EventType, Location};

pub fn locations_router() -> Router<AppState> {
    Router::new().route("/", get(list_locations).post(create_location))
}

pub fn event_types_router() -> Router<AppState> {
    Router::new().route("/", get(list_event_types).post(create_event_type))
}

pub fn info_router() -> Router<AppState> {
    Router::new().route("/", get(get_info).post(set_info))
}

#[derive(Debug, Serialize)]
struct Created {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct NewLocation {
    name: String,
    route: String,
    features: String,
}

#[derive(Debug, Deserialize)]
struct NewEventType {
    name: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct InfoQuery {
    key: String,
}

#[derive(Debug, Deserialize)]
struct NewInfo {
    key: String,
    value: String,
}

async fn list_locations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Location>>, ApiError> {
    Ok(Json(state.reference.locations().await?))
}

async fn create_location(
    State(state): State<AppState>,
    Json(body): Json<NewLocation>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let id = state
        .reference
        .add_location(&body.name, &body.route, &body.features)
        .await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

async fn list_event_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<EventType>>, ApiError> {
    Ok(Json(state.reference.event_types().await?))
}

async fn create_event_type(
    State(state): State<AppState>,
    Json(body): Json<NewEventType>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let id = state
        .reference
        .add_event_type(&body.name, &body.description)
        .await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

async fn get_info(
    State(state): State<AppState>,
    Query(query): Query<InfoQuery>,
) -> Result<Json<ClubInfo>, ApiError> {
    Ok(Json(state.reference.info(&query.key).await?))
}

async fn set_info(
    State(state): State<AppState>,
    Json(body): Json<NewInfo>,
) -> Result<StatusCode, ApiError> {
    state.reference.set_info(&body.key, &body.value).await?;
    Ok(StatusCode::NO_CONTENT)
}
