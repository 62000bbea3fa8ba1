//! Follow-graph procedure group.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use service::{
    page::Page,
    views::{FollowEntry, FollowStats},
};

use crate::{auth::CurrentUser, error::ApiError, state::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdInput {
    pub user_id: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPageInput {
    pub user_id: i32,
    pub limit: Option<u64>,
    pub cursor: Option<String>,
}

pub async fn toggle(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<UserIdInput>,
) -> Result<Json<Value>, ApiError> {
    let following = service::follow::toggle(&state.conn, user.id, input.user_id).await?;
    Ok(Json(json!({ "following": following })))
}

pub async fn is_following(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<UserIdInput>,
) -> Result<Json<Value>, ApiError> {
    let following = service::follow::is_following(&state.conn, user.id, input.user_id).await?;
    Ok(Json(json!({ "following": following })))
}

pub async fn followers(
    State(state): State<AppState>,
    Json(input): Json<UserPageInput>,
) -> Result<Json<Page<FollowEntry>>, ApiError> {
    let page = service::follow::followers(
        &state.conn,
        input.user_id,
        input.limit,
        input.cursor.as_deref(),
    )
    .await?;
    Ok(Json(page))
}

pub async fn following(
    State(state): State<AppState>,
    Json(input): Json<UserPageInput>,
) -> Result<Json<Page<FollowEntry>>, ApiError> {
    let page = service::follow::following(
        &state.conn,
        input.user_id,
        input.limit,
        input.cursor.as_deref(),
    )
    .await?;
    Ok(Json(page))
}

pub async fn stats(
    State(state): State<AppState>,
    Json(input): Json<UserIdInput>,
) -> Result<Json<FollowStats>, ApiError> {
    let stats = service::follow::stats(&state.conn, input.user_id).await?;
    Ok(Json(stats))
}
