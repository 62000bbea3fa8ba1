//! Notification recorder and reads. Recording and removal always run on the
//! caller's transaction, so a notification exists exactly when its
//! triggering interaction does.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use entity::{notification, notification::NotificationKind, user};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DbConn, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait, Set,
};

use crate::{page, page::Page, views::NotificationView, ServiceError};

/// Inserts the notification row for an interaction. Callers skip self
/// notifications before getting here.
pub(crate) async fn record<C: ConnectionTrait>(
    db: &C,
    kind: NotificationKind,
    actor_id: i32,
    recipient_id: i32,
    post_id: Option<i32>,
    at: DateTime<Utc>,
) -> Result<(), ServiceError> {
    notification::ActiveModel {
        recipient_id: Set(recipient_id),
        actor_id: Set(actor_id),
        kind: Set(kind),
        post_id: Set(post_id),
        is_read: Set(false),
        created_at: Set(at),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(())
}

/// Removes the notification(s) matching an undone interaction, looked up by
/// (actor, recipient, kind, post).
pub(crate) async fn remove<C: ConnectionTrait>(
    db: &C,
    kind: NotificationKind,
    actor_id: i32,
    recipient_id: i32,
    post_id: Option<i32>,
) -> Result<(), ServiceError> {
    let mut delete = notification::Entity::delete_many()
        .filter(notification::Column::ActorId.eq(actor_id))
        .filter(notification::Column::RecipientId.eq(recipient_id))
        .filter(notification::Column::Kind.eq(kind));
    if let Some(post_id) = post_id {
        delete = delete.filter(notification::Column::PostId.eq(post_id));
    }
    delete.exec(db).await?;
    Ok(())
}

pub async fn list(
    db: &DbConn,
    user_id: i32,
    limit: Option<u64>,
    cursor: Option<&str>,
) -> Result<Page<NotificationView>, ServiceError> {
    let limit = page::clamp_limit(limit);
    let before = page::parse_cursor(cursor)?;

    let rows = notification::Entity::find()
        .filter(notification::Column::RecipientId.eq(user_id))
        .apply_if(before, |q, ts| {
            q.filter(notification::Column::CreatedAt.lt(ts))
        })
        .order_by_desc(notification::Column::CreatedAt)
        .limit(limit + 1)
        .all(db)
        .await?;

    let (rows, next_cursor) = page::paginate(rows, limit, |n| n.created_at);

    let actor_ids: Vec<i32> = rows.iter().map(|n| n.actor_id).collect();
    let actors: HashMap<i32, user::Model> = user::Entity::find()
        .filter(user::Column::Id.is_in(actor_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let items = rows
        .into_iter()
        .filter_map(|n| {
            let actor = actors.get(&n.actor_id)?.clone();
            Some(NotificationView {
                id: n.id,
                kind: n.kind,
                actor: actor.into(),
                post_id: n.post_id,
                is_read: n.is_read,
                created_at: n.created_at,
            })
        })
        .collect();

    Ok(Page { items, next_cursor })
}

pub async fn unread_count(db: &DbConn, user_id: i32) -> Result<u64, ServiceError> {
    let count = notification::Entity::find()
        .filter(notification::Column::RecipientId.eq(user_id))
        .filter(notification::Column::IsRead.eq(false))
        .count(db)
        .await?;
    Ok(count)
}

/// Marks one of the recipient's notifications read. A notification that does
/// not exist, or belongs to someone else, is NotFound.
pub async fn mark_as_read(
    db: &DbConn,
    user_id: i32,
    notification_id: i32,
) -> Result<(), ServiceError> {
    let row = notification::Entity::find_by_id(notification_id)
        .filter(notification::Column::RecipientId.eq(user_id))
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("notification"))?;

    let mut active: notification::ActiveModel = row.into();
    active.is_read = Set(true);
    active.update(db).await?;
    Ok(())
}

pub async fn mark_all_as_read(db: &DbConn, user_id: i32) -> Result<u64, ServiceError> {
    let result = notification::Entity::update_many()
        .col_expr(notification::Column::IsRead, Expr::value(true))
        .filter(notification::Column::RecipientId.eq(user_id))
        .filter(notification::Column::IsRead.eq(false))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

pub async fn delete(
    db: &DbConn,
    user_id: i32,
    notification_id: i32,
) -> Result<(), ServiceError> {
    let row = notification::Entity::find_by_id(notification_id)
        .filter(notification::Column::RecipientId.eq(user_id))
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("notification"))?;
    notification::Entity::delete_by_id(row.id).exec(db).await?;
    Ok(())
}

pub async fn clear_all(db: &DbConn, user_id: i32) -> Result<u64, ServiceError> {
    let result = notification::Entity::delete_many()
        .filter(notification::Column::RecipientId.eq(user_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
