mod common;

use common::*;
use entity::{like, notification, notification::NotificationKind, repost};
use pretty_assertions::assert_eq;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use service::{
    interaction::{toggle_like, toggle_repost},
    post::create_post,
    ServiceError,
};

#[tokio::test]
async fn like_toggle_round_trip_leaves_one_row_and_one_notification() {
    let db = setup().await;
    let alice = user(&db, "alice", false).await;
    let bob = user(&db, "bob", false).await;
    let p = post_at(&db, alice.id, "hello", None, ago(10)).await;

    assert!(toggle_like(&db, bob.id, p.id).await.unwrap());
    assert!(!toggle_like(&db, bob.id, p.id).await.unwrap());
    assert!(toggle_like(&db, bob.id, p.id).await.unwrap());

    let likes = like::Entity::find()
        .filter(like::Column::PostId.eq(p.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(likes, 1);

    let notifications = notification::Entity::find()
        .filter(notification::Column::RecipientId.eq(alice.id))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Like);
    assert_eq!(notifications[0].actor_id, bob.id);
    assert_eq!(notifications[0].post_id, Some(p.id));
}

#[tokio::test]
async fn unliking_retracts_the_notification() {
    let db = setup().await;
    let alice = user(&db, "alice", false).await;
    let bob = user(&db, "bob", false).await;
    let p = post_at(&db, alice.id, "hello", None, ago(10)).await;

    toggle_like(&db, bob.id, p.id).await.unwrap();
    toggle_like(&db, bob.id, p.id).await.unwrap();

    let remaining = notification::Entity::find().count(&db).await.unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn self_like_produces_no_notification() {
    let db = setup().await;
    let alice = user(&db, "alice", false).await;
    let p = post_at(&db, alice.id, "hello", None, ago(10)).await;

    assert!(toggle_like(&db, alice.id, p.id).await.unwrap());

    let notifications = notification::Entity::find().count(&db).await.unwrap();
    assert_eq!(notifications, 0);
}

#[tokio::test]
async fn repost_toggle_round_trip() {
    let db = setup().await;
    let alice = user(&db, "alice", false).await;
    let bob = user(&db, "bob", false).await;
    let p = post_at(&db, alice.id, "hello", None, ago(10)).await;

    assert!(toggle_repost(&db, bob.id, p.id).await.unwrap());
    assert!(!toggle_repost(&db, bob.id, p.id).await.unwrap());

    let reposts = repost::Entity::find().count(&db).await.unwrap();
    assert_eq!(reposts, 0);
    let notifications = notification::Entity::find().count(&db).await.unwrap();
    assert_eq!(notifications, 0);
}

#[tokio::test]
async fn liking_a_private_post_requires_visibility() {
    let db = setup().await;
    let hermit = user(&db, "hermit", true).await;
    let stranger = user(&db, "stranger", false).await;
    let fan = user(&db, "fan", false).await;
    follow(&db, fan.id, hermit.id).await;
    let p = post_at(&db, hermit.id, "hidden", None, ago(10)).await;

    let err = toggle_like(&db, stranger.id, p.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));

    assert!(toggle_like(&db, fan.id, p.id).await.unwrap());
}

#[tokio::test]
async fn liking_a_missing_post_is_not_found() {
    let db = setup().await;
    let alice = user(&db, "alice", false).await;
    let err = toggle_like(&db, alice.id, 999).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn replying_notifies_the_parent_author() {
    let db = setup().await;
    let alice = user(&db, "alice", false).await;
    let bob = user(&db, "bob", false).await;
    let parent = post_at(&db, alice.id, "parent", None, ago(10)).await;

    let reply = create_post(&db, bob.id, "reply", Some(parent.id)).await.unwrap();
    assert_eq!(reply.parent_author.as_ref().map(|a| a.id), Some(alice.id));

    let notifications = notification::Entity::find()
        .filter(notification::Column::RecipientId.eq(alice.id))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Reply);
    // The notification points at the reply so the recipient can jump to it.
    assert_eq!(notifications[0].post_id, Some(reply.id));
}

#[tokio::test]
async fn self_reply_produces_no_notification() {
    let db = setup().await;
    let alice = user(&db, "alice", false).await;
    let parent = post_at(&db, alice.id, "parent", None, ago(10)).await;

    create_post(&db, alice.id, "me again", Some(parent.id)).await.unwrap();

    let notifications = notification::Entity::find().count(&db).await.unwrap();
    assert_eq!(notifications, 0);
}

#[tokio::test]
async fn post_content_is_validated() {
    let db = setup().await;
    let alice = user(&db, "alice", false).await;

    let err = create_post(&db, alice.id, "   ", None).await.unwrap_err();
    assert!(matches!(err, ServiceError::BadRequest(_)));

    let long = "x".repeat(281);
    let err = create_post(&db, alice.id, &long, None).await.unwrap_err();
    assert!(matches!(err, ServiceError::BadRequest(_)));

    let maximal = "y".repeat(280);
    let ok = create_post(&db, alice.id, &maximal, None).await.unwrap();
    assert_eq!(ok.content.chars().count(), 280);
}
