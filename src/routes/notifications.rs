//! Notifications procedure group; every endpoint is scoped to the session
//! user as recipient.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use service::{page::Page, views::NotificationView};

use crate::{auth::CurrentUser, error::ApiError, state::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInput {
    pub limit: Option<u64>,
    pub cursor: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationIdInput {
    pub notification_id: i32,
}

pub async fn get_notifications(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<PageInput>,
) -> Result<Json<Page<NotificationView>>, ApiError> {
    let page = service::notification::list(
        &state.conn,
        user.id,
        input.limit,
        input.cursor.as_deref(),
    )
    .await?;
    Ok(Json(page))
}

pub async fn get_unread_count(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, ApiError> {
    let count = service::notification::unread_count(&state.conn, user.id).await?;
    Ok(Json(json!({ "count": count })))
}

pub async fn mark_as_read(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<NotificationIdInput>,
) -> Result<Json<Value>, ApiError> {
    service::notification::mark_as_read(&state.conn, user.id, input.notification_id).await?;
    Ok(Json(json!({ "ok": true })))
}

pub async fn mark_all_as_read(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, ApiError> {
    let updated = service::notification::mark_all_as_read(&state.conn, user.id).await?;
    Ok(Json(json!({ "updated": updated })))
}

pub async fn delete_notification(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<NotificationIdInput>,
) -> Result<Json<Value>, ApiError> {
    service::notification::delete(&state.conn, user.id, input.notification_id).await?;
    Ok(Json(json!({ "ok": true })))
}

pub async fn clear_all_notifications(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, ApiError> {
    let deleted = service::notification::clear_all(&state.conn, user.id).await?;
    Ok(Json(json!({ "deleted": deleted })))
}
