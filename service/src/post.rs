//! Post creation and single-post reads.

use std::collections::HashMap;

use chrono::Utc;
use entity::{notification::NotificationKind, post, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, Set, TransactionTrait,
};

use crate::{
    engagement::{self, EngagementMap},
    hashtag, notification,
    views::{PostView, UserSummary},
    visibility, ServiceError,
};

pub const MAX_CONTENT_CHARS: usize = 280;

/// Creates a post or reply. Hashtag extraction and the reply notification
/// share the insert's transaction.
pub async fn create_post(
    db: &DbConn,
    author_id: i32,
    content: &str,
    parent_post_id: Option<i32>,
) -> Result<PostView, ServiceError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ServiceError::BadRequest("content must not be empty".into()));
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(ServiceError::BadRequest(format!(
            "content exceeds {MAX_CONTENT_CHARS} characters"
        )));
    }

    let author = user::Entity::find_by_id(author_id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("user"))?;

    let parent = match parent_post_id {
        Some(parent_id) => {
            let (parent, parent_author) = load_post_checked(db, Some(author_id), parent_id).await?;
            Some((parent, parent_author))
        }
        None => None,
    };
    let parent_author_id = parent.as_ref().map(|(p, _)| p.author_id);
    let parent_author = parent.map(|(_, a)| UserSummary::from(a));

    let content = content.to_owned();
    let inserted = db
        .transaction::<_, post::Model, ServiceError>(move |txn| {
            Box::pin(async move {
                let now = Utc::now();
                let inserted = post::ActiveModel {
                    content: Set(content),
                    author_id: Set(author_id),
                    parent_post_id: Set(parent_post_id),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(txn)
                .await?;

                hashtag::associate(txn, inserted.id, &inserted.content, now).await?;

                if let Some(recipient) = parent_author_id {
                    if recipient != author_id {
                        notification::record(
                            txn,
                            NotificationKind::Reply,
                            author_id,
                            recipient,
                            Some(inserted.id),
                            now,
                        )
                        .await?;
                    }
                }

                Ok(inserted)
            })
        })
        .await?;

    tracing::debug!(post_id = inserted.id, author_id, "post created");

    Ok(PostView::assemble(
        inserted,
        author,
        &EngagementMap::default(),
        parent_author,
    ))
}

/// Fetches a post with its author and enforces the visibility invariant.
/// `viewer` of `None` is the unauthenticated variant: private authors are
/// rejected unconditionally.
pub(crate) async fn load_post_checked(
    db: &DbConn,
    viewer_id: Option<i32>,
    post_id: i32,
) -> Result<(post::Model, user::Model), ServiceError> {
    let (post, author) = post::Entity::find_by_id(post_id)
        .find_also_related(user::Entity)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("post"))?;
    let author = author.ok_or(ServiceError::NotFound("user"))?;

    if author.is_private {
        let visible = visibility::visible_private_authors(db, viewer_id).await?;
        if !visibility::can_view(author.id, author.is_private, &visible) {
            return Err(ServiceError::Forbidden("this account is private"));
        }
    }

    Ok((post, author))
}

pub async fn get_post(
    db: &DbConn,
    viewer_id: Option<i32>,
    post_id: i32,
) -> Result<PostView, ServiceError> {
    let (post, author) = load_post_checked(db, viewer_id, post_id).await?;
    let engagement = engagement::load(db, &[post.id], viewer_id).await?;
    let parents = parent_authors(db, std::slice::from_ref(&post)).await?;
    let parent_author = post.parent_post_id.and_then(|id| parents.get(&id).cloned());
    Ok(PostView::assemble(post, author, &engagement, parent_author))
}

/// Batched parent-author lookup for reply rendering, keyed by parent post id.
pub(crate) async fn parent_authors(
    db: &DbConn,
    posts: &[post::Model],
) -> Result<HashMap<i32, UserSummary>, ServiceError> {
    let parent_ids: Vec<i32> = posts.iter().filter_map(|p| p.parent_post_id).collect();
    if parent_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let parents = post::Entity::find()
        .filter(post::Column::Id.is_in(parent_ids))
        .find_also_related(user::Entity)
        .all(db)
        .await?;
    Ok(parents
        .into_iter()
        .filter_map(|(parent, author)| author.map(|a| (parent.id, UserSummary::from(a))))
        .collect())
}
