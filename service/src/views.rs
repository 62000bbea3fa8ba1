//! Wire-facing view types returned by the procedures, camelCase on the wire.

use chrono::{DateTime, Utc};
use entity::{notification::NotificationKind, user};
use serde::Serialize;

use crate::engagement::EngagementMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i32,
    pub name: String,
    pub image: Option<String>,
    pub is_private: bool,
}

impl From<user::Model> for UserSummary {
    fn from(user: user::Model) -> Self {
        UserSummary {
            id: user.id,
            name: user.name,
            image: user.image,
            is_private: user.is_private,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Engagement {
    pub like_count: i64,
    pub repost_count: i64,
    pub reply_count: i64,
    pub liked_by_viewer: bool,
    pub reposted_by_viewer: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: i32,
    pub content: String,
    pub author: UserSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_post_id: Option<i32>,
    /// Author of the parent post, populated for replies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_author: Option<UserSummary>,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub engagement: Engagement,
}

impl PostView {
    pub fn assemble(
        post: entity::post::Model,
        author: user::Model,
        engagement: &EngagementMap,
        parent_author: Option<UserSummary>,
    ) -> Self {
        PostView {
            id: post.id,
            content: post.content,
            author: author.into(),
            parent_post_id: post.parent_post_id,
            parent_author,
            created_at: post.created_at,
            engagement: engagement.for_post(post.id),
        }
    }
}

/// One feed entry: either a direct post or a post surfaced by a repost.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    #[serde(flatten)]
    pub post: PostView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reposted_by: Option<UserSummary>,
    /// Repost created_at for repost entries, post created_at otherwise.
    pub feed_timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyNode {
    #[serde(flatten)]
    pub post: PostView,
    pub replies: Vec<ReplyNode>,
}

/// Ancestor chain of a post, root first, plus the post itself.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadView {
    pub ancestors: Vec<PostView>,
    pub post: PostView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingPost {
    #[serde(flatten)]
    pub post: PostView,
    pub engagement_score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HashtagView {
    pub id: i32,
    pub name: String,
    pub usage_count: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    pub id: i32,
    pub kind: NotificationKind,
    pub actor: UserSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<i32>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowEntry {
    pub user: UserSummary,
    pub followed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowStats {
    pub followers: u64,
    pub following: u64,
    pub posts: u64,
}
