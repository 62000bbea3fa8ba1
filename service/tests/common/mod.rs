#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use entity::{follow, like, notification, notification::NotificationKind, post, repost, user};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, Database, DbConn, Set};

pub async fn setup() -> DbConn {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("sqlite connect");
    Migrator::up(&db, None).await.expect("migrations");
    db
}

/// A timestamp `mins` minutes in the past; larger is older.
pub fn ago(mins: i64) -> DateTime<Utc> {
    Utc::now() - Duration::minutes(mins)
}

pub async fn user(db: &DbConn, name: &str, is_private: bool) -> user::Model {
    user::ActiveModel {
        name: Set(name.to_owned()),
        email: Set(format!("{name}@example.com")),
        image: Set(None),
        is_private: Set(is_private),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert user")
}

pub async fn post_at(
    db: &DbConn,
    author_id: i32,
    content: &str,
    parent_post_id: Option<i32>,
    at: DateTime<Utc>,
) -> post::Model {
    post::ActiveModel {
        content: Set(content.to_owned()),
        author_id: Set(author_id),
        parent_post_id: Set(parent_post_id),
        created_at: Set(at),
        updated_at: Set(at),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert post")
}

pub async fn like_at(db: &DbConn, user_id: i32, post_id: i32, at: DateTime<Utc>) -> like::Model {
    like::ActiveModel {
        user_id: Set(user_id),
        post_id: Set(post_id),
        created_at: Set(at),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert like")
}

pub async fn repost_at(
    db: &DbConn,
    user_id: i32,
    post_id: i32,
    at: DateTime<Utc>,
) -> repost::Model {
    repost::ActiveModel {
        user_id: Set(user_id),
        post_id: Set(post_id),
        created_at: Set(at),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert repost")
}

pub async fn follow(db: &DbConn, follower_id: i32, following_id: i32) -> follow::Model {
    follow::ActiveModel {
        follower_id: Set(follower_id),
        following_id: Set(following_id),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert follow")
}

pub async fn notification_at(
    db: &DbConn,
    recipient_id: i32,
    actor_id: i32,
    kind: NotificationKind,
    post_id: Option<i32>,
    at: DateTime<Utc>,
) -> notification::Model {
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
    .await
    .expect("insert notification")
}
