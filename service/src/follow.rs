//! Follow graph: toggle, lookups and paginated follower/following lists.

use std::collections::HashMap;

use chrono::Utc;
use entity::{follow, notification::NotificationKind, post, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, Set, TransactionTrait,
};

use crate::{
    notification, page,
    page::Page,
    views::{FollowEntry, FollowStats},
    ServiceError,
};

/// Toggles the follow edge follower -> following. Returns `true` when the
/// edge now exists. Following oneself is rejected.
pub async fn toggle(
    db: &DbConn,
    follower_id: i32,
    following_id: i32,
) -> Result<bool, ServiceError> {
    if follower_id == following_id {
        return Err(ServiceError::BadRequest("cannot follow yourself".into()));
    }
    user::Entity::find_by_id(following_id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("user"))?;

    let following = db
        .transaction::<_, bool, ServiceError>(move |txn| {
            Box::pin(async move {
                let existing = follow::Entity::find()
                    .filter(follow::Column::FollowerId.eq(follower_id))
                    .filter(follow::Column::FollowingId.eq(following_id))
                    .one(txn)
                    .await?;

                match existing {
                    Some(edge) => {
                        follow::Entity::delete_by_id(edge.id).exec(txn).await?;
                        notification::remove(
                            txn,
                            NotificationKind::Follow,
                            follower_id,
                            following_id,
                            None,
                        )
                        .await?;
                        Ok(false)
                    }
                    None => {
                        follow::ActiveModel {
                            follower_id: Set(follower_id),
                            following_id: Set(following_id),
                            created_at: Set(Utc::now()),
                            ..Default::default()
                        }
                        .insert(txn)
                        .await?;
                        notification::record(
                            txn,
                            NotificationKind::Follow,
                            follower_id,
                            following_id,
                            None,
                            Utc::now(),
                        )
                        .await?;
                        Ok(true)
                    }
                }
            })
        })
        .await?;

    Ok(following)
}

pub async fn is_following(
    db: &DbConn,
    follower_id: i32,
    following_id: i32,
) -> Result<bool, ServiceError> {
    let existing = follow::Entity::find()
        .filter(follow::Column::FollowerId.eq(follower_id))
        .filter(follow::Column::FollowingId.eq(following_id))
        .one(db)
        .await?;
    Ok(existing.is_some())
}

pub async fn followers(
    db: &DbConn,
    user_id: i32,
    limit: Option<u64>,
    cursor: Option<&str>,
) -> Result<Page<FollowEntry>, ServiceError> {
    list_edges(db, user_id, limit, cursor, Direction::Followers).await
}

pub async fn following(
    db: &DbConn,
    user_id: i32,
    limit: Option<u64>,
    cursor: Option<&str>,
) -> Result<Page<FollowEntry>, ServiceError> {
    list_edges(db, user_id, limit, cursor, Direction::Following).await
}

enum Direction {
    Followers,
    Following,
}

async fn list_edges(
    db: &DbConn,
    user_id: i32,
    limit: Option<u64>,
    cursor: Option<&str>,
    direction: Direction,
) -> Result<Page<FollowEntry>, ServiceError> {
    user::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("user"))?;

    let limit = page::clamp_limit(limit);
    let before = page::parse_cursor(cursor)?;

    let (anchor, other): (follow::Column, fn(&follow::Model) -> i32) = match direction {
        Direction::Followers => (follow::Column::FollowingId, |e| e.follower_id),
        Direction::Following => (follow::Column::FollowerId, |e| e.following_id),
    };

    let edges = follow::Entity::find()
        .filter(anchor.eq(user_id))
        .apply_if(before, |q, ts| q.filter(follow::Column::CreatedAt.lt(ts)))
        .order_by_desc(follow::Column::CreatedAt)
        .limit(limit + 1)
        .all(db)
        .await?;

    let (edges, next_cursor) = page::paginate(edges, limit, |e| e.created_at);

    let user_ids: Vec<i32> = edges.iter().map(|e| other(e)).collect();
    let users: HashMap<i32, user::Model> = user::Entity::find()
        .filter(user::Column::Id.is_in(user_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let items = edges
        .into_iter()
        .filter_map(|e| {
            let user = users.get(&other(&e))?.clone();
            Some(FollowEntry {
                user: user.into(),
                followed_at: e.created_at,
            })
        })
        .collect();

    Ok(Page { items, next_cursor })
}

pub async fn stats(db: &DbConn, user_id: i32) -> Result<FollowStats, ServiceError> {
    user::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("user"))?;

    let followers = follow::Entity::find()
        .filter(follow::Column::FollowingId.eq(user_id))
        .count(db)
        .await?;
    let following = follow::Entity::find()
        .filter(follow::Column::FollowerId.eq(user_id))
        .count(db)
        .await?;
    let posts = post::Entity::find()
        .filter(post::Column::AuthorId.eq(user_id))
        .count(db)
        .await?;

    Ok(FollowStats {
        followers,
        following,
        posts,
    })
}
