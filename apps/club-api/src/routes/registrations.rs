//! Registration endpoints: the HTTP face of the registration facade.
//!
//! Mounted under `/v1/events/:event_id/registration`. The member acts on
//! their own registration; registering takes the member id in the body,
//! status checks and cancellation take it as a query parameter.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::routes::events::MemberQuery;
use crate::AppState;
use clubhouse_core::RegistrationStatus;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub member_id: String,
}

#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub status: RegistrationStatus,
}

/// `POST /v1/events/:event_id/registration`
pub async fn register(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegistrationResponse>), ApiError> {
    let status = state.registrations.register(&body.member_id, event_id).await?;
    Ok((StatusCode::CREATED, Json(RegistrationResponse { status })))
}

/// `DELETE /v1/events/:event_id/registration?member_id=`
pub async fn cancel(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    Query(query): Query<MemberQuery>,
) -> Result<Json<RegistrationResponse>, ApiError> {
    let status = state.registrations.cancel(&query.member_id, event_id).await?;
    Ok(Json(RegistrationResponse { status }))
}

/// `GET /v1/events/:event_id/registration?member_id=`
pub async fn check_registration(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    Query(query): Query<MemberQuery>,
) -> Result<Json<RegistrationResponse>, ApiError> {
    let status = state.registrations.status(&query.member_id, event_id).await?;
    Ok(Json(RegistrationResponse { status }))
}
