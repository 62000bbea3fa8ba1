mod common;

use chrono::{Duration, Utc};
use common::*;
use entity::session;
use pretty_assertions::assert_eq;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use service::{
    auth::{login, resolve},
    ServiceError,
};

#[tokio::test]
async fn login_issues_a_resolvable_session() {
    let db = setup().await;
    let alice = user(&db, "alice", false).await;

    let (token, summary) = login(&db, "alice@example.com", "tok-1".into())
        .await
        .unwrap();
    assert_eq!(token, "tok-1");
    assert_eq!(summary.id, alice.id);

    let resolved = resolve(&db, "tok-1").await.unwrap();
    assert_eq!(resolved.id, alice.id);
}

#[tokio::test]
async fn unknown_email_is_not_found() {
    let db = setup().await;
    let err = login(&db, "ghost@example.com", "tok".into())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn unknown_token_is_unauthorized() {
    let db = setup().await;
    let err = resolve(&db, "nope").await.unwrap_err();
    assert!(matches!(err, ServiceError::Unauthorized));
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    let db = setup().await;
    let alice = user(&db, "alice", false).await;
    session::ActiveModel {
        token: Set("stale".into()),
        user_id: Set(alice.id),
        created_at: Set(Utc::now() - Duration::days(31)),
        expires_at: Set(Utc::now() - Duration::days(1)),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();

    let err = resolve(&db, "stale").await.unwrap_err();
    assert!(matches!(err, ServiceError::Unauthorized));
}

#[tokio::test]
async fn login_purges_expired_sessions() {
    let db = setup().await;
    let alice = user(&db, "alice", false).await;
    session::ActiveModel {
        token: Set("stale".into()),
        user_id: Set(alice.id),
        created_at: Set(Utc::now() - Duration::days(31)),
        expires_at: Set(Utc::now() - Duration::days(1)),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();

    login(&db, "alice@example.com", "fresh".into()).await.unwrap();

    let stale = session::Entity::find()
        .filter(session::Column::Token.eq("stale"))
        .one(&db)
        .await
        .unwrap();
    assert!(stale.is_none());
    // Live sessions survive the cleanup.
    assert!(resolve(&db, "fresh").await.is_ok());
}
