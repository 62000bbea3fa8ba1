//! Feed procedure group: the home feed, post creation, like/repost toggles
//! and the single-post, replies and thread reads (with public variants).

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use service::{
    page::Page,
    views::{FeedItem, PostView, ReplyNode, ThreadView},
};

use crate::{
    auth::CurrentUser,
    error::ApiError,
    state::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInput {
    pub limit: Option<u64>,
    pub cursor: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostInput {
    pub content: String,
    pub parent_post_id: Option<i32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostIdInput {
    pub post_id: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPageInput {
    pub post_id: i32,
    pub limit: Option<u64>,
    pub cursor: Option<String>,
}

pub async fn get_feed(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<PageInput>,
) -> Result<Json<Page<FeedItem>>, ApiError> {
    let page =
        service::feed::get_feed(&state.conn, user.id, input.limit, input.cursor.as_deref()).await?;
    Ok(Json(page))
}

pub async fn create_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<CreatePostInput>,
) -> Result<Json<PostView>, ApiError> {
    let post =
        service::post::create_post(&state.conn, user.id, &input.content, input.parent_post_id)
            .await?;
    Ok(Json(post))
}

pub async fn like_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<PostIdInput>,
) -> Result<Json<Value>, ApiError> {
    let liked = service::interaction::toggle_like(&state.conn, user.id, input.post_id).await?;
    Ok(Json(json!({ "liked": liked })))
}

pub async fn repost_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<PostIdInput>,
) -> Result<Json<Value>, ApiError> {
    let reposted =
        service::interaction::toggle_repost(&state.conn, user.id, input.post_id).await?;
    Ok(Json(json!({ "reposted": reposted })))
}

pub async fn get_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<PostIdInput>,
) -> Result<Json<PostView>, ApiError> {
    let post = service::post::get_post(&state.conn, Some(user.id), input.post_id).await?;
    Ok(Json(post))
}

pub async fn get_public_post(
    State(state): State<AppState>,
    Json(input): Json<PostIdInput>,
) -> Result<Json<PostView>, ApiError> {
    let post = service::post::get_post(&state.conn, None, input.post_id).await?;
    Ok(Json(post))
}

pub async fn get_post_replies(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<PostPageInput>,
) -> Result<Json<Page<ReplyNode>>, ApiError> {
    let page = service::thread::get_post_replies(
        &state.conn,
        Some(user.id),
        input.post_id,
        input.limit,
        input.cursor.as_deref(),
    )
    .await?;
    Ok(Json(page))
}

pub async fn get_public_post_replies(
    State(state): State<AppState>,
    Json(input): Json<PostPageInput>,
) -> Result<Json<Page<ReplyNode>>, ApiError> {
    let page = service::thread::get_post_replies(
        &state.conn,
        None,
        input.post_id,
        input.limit,
        input.cursor.as_deref(),
    )
    .await?;
    Ok(Json(page))
}

pub async fn get_post_thread(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<PostIdInput>,
) -> Result<Json<ThreadView>, ApiError> {
    let thread = service::thread::get_thread(&state.conn, Some(user.id), input.post_id).await?;
    Ok(Json(thread))
}

pub async fn get_public_post_thread(
    State(state): State<AppState>,
    Json(input): Json<PostIdInput>,
) -> Result<Json<ThreadView>, ApiError> {
    let thread = service::thread::get_thread(&state.conn, None, input.post_id).await?;
    Ok(Json(thread))
}
