mod common;

use common::*;
use pretty_assertions::assert_eq;
use service::{post::get_post, ServiceError};

#[tokio::test]
async fn public_posts_are_visible_to_everyone() {
    let db = setup().await;
    let alice = user(&db, "alice", false).await;
    let bob = user(&db, "bob", false).await;
    let p = post_at(&db, alice.id, "hello", None, ago(5)).await;

    let as_stranger = get_post(&db, Some(bob.id), p.id).await.unwrap();
    assert_eq!(as_stranger.id, p.id);
    assert_eq!(as_stranger.author.id, alice.id);

    let anonymous = get_post(&db, None, p.id).await.unwrap();
    assert_eq!(anonymous.id, p.id);
}

#[tokio::test]
async fn private_posts_require_a_follow_edge() {
    let db = setup().await;
    let hermit = user(&db, "hermit", true).await;
    let fan = user(&db, "fan", false).await;
    let stranger = user(&db, "stranger", false).await;
    follow(&db, fan.id, hermit.id).await;
    let p = post_at(&db, hermit.id, "for followers", None, ago(5)).await;

    let as_fan = get_post(&db, Some(fan.id), p.id).await.unwrap();
    assert_eq!(as_fan.id, p.id);

    let err = get_post(&db, Some(stranger.id), p.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
}

#[tokio::test]
async fn authors_always_see_their_own_private_posts() {
    let db = setup().await;
    let hermit = user(&db, "hermit", true).await;
    let p = post_at(&db, hermit.id, "note to self", None, ago(5)).await;

    let own = get_post(&db, Some(hermit.id), p.id).await.unwrap();
    assert_eq!(own.id, p.id);
}

#[tokio::test]
async fn anonymous_readers_never_see_private_posts() {
    let db = setup().await;
    let hermit = user(&db, "hermit", true).await;
    let fan = user(&db, "fan", false).await;
    follow(&db, fan.id, hermit.id).await;
    let p = post_at(&db, hermit.id, "for followers", None, ago(5)).await;

    // A follow edge helps an authenticated viewer, never the public surface.
    let err = get_post(&db, None, p.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
}

#[tokio::test]
async fn following_the_wrong_way_does_not_grant_access() {
    let db = setup().await;
    let hermit = user(&db, "hermit", true).await;
    let stranger = user(&db, "stranger", false).await;
    // The private account follows the viewer, not the reverse.
    follow(&db, hermit.id, stranger.id).await;
    let p = post_at(&db, hermit.id, "still hidden", None, ago(5)).await;

    let err = get_post(&db, Some(stranger.id), p.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
}
