//! Like and repost toggles. The check and the act run inside one
//! transaction together with the notification write, and the schema's
//! unique (user_id, post_id) constraints make duplicate rows impossible.

use chrono::Utc;
use entity::{like, notification::NotificationKind, repost};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, Set, TransactionTrait,
};

use crate::{notification, post, ServiceError};

/// Toggles the viewer's like on a post. Returns the resulting state:
/// `true` when the post is now liked.
pub async fn toggle_like(
    db: &DbConn,
    user_id: i32,
    post_id: i32,
) -> Result<bool, ServiceError> {
    let (_, author) = post::load_post_checked(db, Some(user_id), post_id).await?;
    let author_id = author.id;

    let liked = db
        .transaction::<_, bool, ServiceError>(move |txn| {
            Box::pin(async move {
                let existing = like::Entity::find()
                    .filter(like::Column::UserId.eq(user_id))
                    .filter(like::Column::PostId.eq(post_id))
                    .one(txn)
                    .await?;

                match existing {
                    Some(row) => {
                        like::Entity::delete_by_id(row.id).exec(txn).await?;
                        notification::remove(
                            txn,
                            NotificationKind::Like,
                            user_id,
                            author_id,
                            Some(post_id),
                        )
                        .await?;
                        Ok(false)
                    }
                    None => {
                        like::ActiveModel {
                            user_id: Set(user_id),
                            post_id: Set(post_id),
                            created_at: Set(Utc::now()),
                            ..Default::default()
                        }
                        .insert(txn)
                        .await?;
                        if author_id != user_id {
                            notification::record(
                                txn,
                                NotificationKind::Like,
                                user_id,
                                author_id,
                                Some(post_id),
                                Utc::now(),
                            )
                            .await?;
                        }
                        Ok(true)
                    }
                }
            })
        })
        .await?;

    Ok(liked)
}

/// Toggles the viewer's repost of a post. Returns `true` when the post is
/// now reposted.
pub async fn toggle_repost(
    db: &DbConn,
    user_id: i32,
    post_id: i32,
) -> Result<bool, ServiceError> {
    let (_, author) = post::load_post_checked(db, Some(user_id), post_id).await?;
    let author_id = author.id;

    let reposted = db
        .transaction::<_, bool, ServiceError>(move |txn| {
            Box::pin(async move {
                let existing = repost::Entity::find()
                    .filter(repost::Column::UserId.eq(user_id))
                    .filter(repost::Column::PostId.eq(post_id))
                    .one(txn)
                    .await?;

                match existing {
                    Some(row) => {
                        repost::Entity::delete_by_id(row.id).exec(txn).await?;
                        notification::remove(
                            txn,
                            NotificationKind::Repost,
                            user_id,
                            author_id,
                            Some(post_id),
                        )
                        .await?;
                        Ok(false)
                    }
                    None => {
                        repost::ActiveModel {
                            user_id: Set(user_id),
                            post_id: Set(post_id),
                            created_at: Set(Utc::now()),
                            ..Default::default()
                        }
                        .insert(txn)
                        .await?;
                        if author_id != user_id {
                            notification::record(
                                txn,
                                NotificationKind::Repost,
                                user_id,
                                author_id,
                                Some(post_id),
                                Utc::now(),
                            )
                            .await?;
                        }
                        Ok(true)
                    }
                }
            })
        })
        .await?;

    Ok(reposted)
}
