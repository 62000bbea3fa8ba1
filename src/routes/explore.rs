//! Explore procedure group. These endpoints work without a session; a
//! present Bearer token only adds viewer-specific interaction flags.

use axum::{extract::State, Json};
use serde::Deserialize;
use service::{
    page::Page,
    trending::Timeframe,
    views::{HashtagView, PostView, TrendingPost, UserSummary},
};

use crate::{
    auth::{CurrentUser, MaybeUser},
    error::ApiError,
    state::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingPostsInput {
    pub limit: Option<u64>,
    pub timeframe: Timeframe,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitInput {
    pub limit: Option<u64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashtagInput {
    pub hashtag: String,
    pub limit: Option<u64>,
    pub cursor: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInput {
    pub query: String,
    pub limit: Option<u64>,
    pub cursor: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInput {
    pub limit: Option<u64>,
    pub cursor: Option<String>,
}

pub async fn get_trending_posts(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Json(input): Json<TrendingPostsInput>,
) -> Result<Json<Vec<TrendingPost>>, ApiError> {
    let posts = service::trending::trending_posts(
        &state.conn,
        user.map(|u| u.id),
        input.limit,
        input.timeframe,
    )
    .await?;
    Ok(Json(posts))
}

pub async fn get_trending_hashtags(
    State(state): State<AppState>,
    Json(input): Json<LimitInput>,
) -> Result<Json<Vec<HashtagView>>, ApiError> {
    let tags = service::trending::trending_hashtags(&state.conn, input.limit).await?;
    Ok(Json(tags))
}

pub async fn get_posts_by_hashtag(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Json(input): Json<HashtagInput>,
) -> Result<Json<Page<PostView>>, ApiError> {
    let page = service::trending::posts_by_hashtag(
        &state.conn,
        user.map(|u| u.id),
        &input.hashtag,
        input.limit,
        input.cursor.as_deref(),
    )
    .await?;
    Ok(Json(page))
}

pub async fn search_posts(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Json(input): Json<SearchInput>,
) -> Result<Json<Page<PostView>>, ApiError> {
    let page = service::trending::search_posts(
        &state.conn,
        user.map(|u| u.id),
        &input.query,
        input.limit,
        input.cursor.as_deref(),
    )
    .await?;
    Ok(Json(page))
}

pub async fn search_users(
    State(state): State<AppState>,
    Json(input): Json<SearchInput>,
) -> Result<Json<Page<UserSummary>>, ApiError> {
    let page = service::trending::search_users(
        &state.conn,
        &input.query,
        input.limit,
        input.cursor.as_deref(),
    )
    .await?;
    Ok(Json(page))
}

pub async fn get_suggested_users(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<LimitInput>,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let users = service::trending::suggested_users(&state.conn, user.id, input.limit).await?;
    Ok(Json(users))
}

pub async fn get_discover_feed(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<PageInput>,
) -> Result<Json<Page<PostView>>, ApiError> {
    let page = service::trending::discover_feed(
        &state.conn,
        user.id,
        input.limit,
        input.cursor.as_deref(),
    )
    .await?;
    Ok(Json(page))
}
