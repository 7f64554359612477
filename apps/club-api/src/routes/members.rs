//! Member endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;
use clubhouse_core::{Member, MemberStatus, NewMember};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_members).post(create_member))
        .route(
            "/:member_id",
            get(get_member)
                .put(update_member)
                .patch(update_member_status)
                .delete(delete_member),
        )
}

#[derive(Debug, Deserialize)]
struct MembersQuery {
    status: Option<MemberStatus>,
}

#[derive(Debug, Serialize)]
struct MemberCreated {
    id: String,
}

#[derive(Debug, Deserialize)]
struct StatusUpdate {
    status: MemberStatus,
}

async fn create_member(
    State(state): State<AppState>,
    Json(body): Json<NewMember>,
) -> Result<(StatusCode, Json<MemberCreated>), ApiError> {
    let member = state.members.add(&body).await?;
    Ok((StatusCode::CREATED, Json(MemberCreated { id: member.id })))
}

async fn list_members(
    State(state): State<AppState>,
    Query(query): Query<MembersQuery>,
) -> Result<Json<Vec<Member>>, ApiError> {
    let members = state.members.list(query.status).await?;
    Ok(Json(members))
}

async fn get_member(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> Result<Json<Member>, ApiError> {
    let member = state.members.get(&member_id).await?;
    Ok(Json(member))
}

async fn update_member(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
    Json(body): Json<NewMember>,
) -> Result<StatusCode, ApiError> {
    state.members.update_profile(&member_id, &body).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn update_member_status(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
    Json(body): Json<StatusUpdate>,
) -> Result<StatusCode, ApiError> {
    state.members.update_status(&member_id, body.status).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_member(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.members.delete(&member_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
