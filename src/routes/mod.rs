mod explore;
mod feed;
mod follows;
mod notifications;

use axum::{
    extract::State,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{error::ApiError, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rpc/auth.login", post(login))
        .route("/rpc/feed.getFeed", post(feed::get_feed))
        .route("/rpc/feed.createPost", post(feed::create_post))
        .route("/rpc/feed.likePost", post(feed::like_post))
        .route("/rpc/feed.repostPost", post(feed::repost_post))
        .route("/rpc/feed.getPost", post(feed::get_post))
        .route("/rpc/feed.getPublicPost", post(feed::get_public_post))
        .route("/rpc/feed.getPostReplies", post(feed::get_post_replies))
        .route(
            "/rpc/feed.getPublicPostReplies",
            post(feed::get_public_post_replies),
        )
        .route("/rpc/feed.getPostThread", post(feed::get_post_thread))
        .route(
            "/rpc/feed.getPublicPostThread",
            post(feed::get_public_post_thread),
        )
        .route(
            "/rpc/explore.getTrendingPosts",
            post(explore::get_trending_posts),
        )
        .route(
            "/rpc/explore.getTrendingHashtags",
            post(explore::get_trending_hashtags),
        )
        .route(
            "/rpc/explore.getPostsByHashtag",
            post(explore::get_posts_by_hashtag),
        )
        .route("/rpc/explore.searchPosts", post(explore::search_posts))
        .route("/rpc/explore.searchUsers", post(explore::search_users))
        .route(
            "/rpc/explore.getSuggestedUsers",
            post(explore::get_suggested_users),
        )
        .route(
            "/rpc/explore.getDiscoverFeed",
            post(explore::get_discover_feed),
        )
        .route(
            "/rpc/notifications.getNotifications",
            post(notifications::get_notifications),
        )
        .route(
            "/rpc/notifications.getUnreadCount",
            post(notifications::get_unread_count),
        )
        .route(
            "/rpc/notifications.markAsRead",
            post(notifications::mark_as_read),
        )
        .route(
            "/rpc/notifications.markAllAsRead",
            post(notifications::mark_all_as_read),
        )
        .route(
            "/rpc/notifications.deleteNotification",
            post(notifications::delete_notification),
        )
        .route(
            "/rpc/notifications.clearAllNotifications",
            post(notifications::clear_all_notifications),
        )
        .route("/rpc/follows.toggle", post(follows::toggle))
        .route("/rpc/follows.isFollowing", post(follows::is_following))
        .route("/rpc/follows.followers", post(follows::followers))
        .route("/rpc/follows.following", post(follows::following))
        .route("/rpc/follows.stats", post(follows::stats))
}

#[derive(Deserialize)]
struct LoginInput {
    email: String,
}

async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<Value>, ApiError> {
    let token = uuid::Uuid::new_v4().simple().to_string();
    let (token, user) = service::auth::login(&state.conn, &input.email, token).await?;
    Ok(Json(json!({ "token": token, "user": user })))
}
