mod common;

use common::*;
use pretty_assertions::assert_eq;
use service::feed::get_feed;

#[tokio::test]
async fn feed_merges_own_and_followee_posts_newest_first() {
    let db = setup().await;
    let viewer = user(&db, "viewer", false).await;
    let alice = user(&db, "alice", false).await;
    let bob = user(&db, "bob", false).await;
    follow(&db, viewer.id, alice.id).await;
    follow(&db, viewer.id, bob.id).await;

    let p1 = post_at(&db, alice.id, "first", None, ago(30)).await;
    let p2 = post_at(&db, bob.id, "second", None, ago(20)).await;
    let p3 = post_at(&db, viewer.id, "mine", None, ago(10)).await;
    // Not followed, must not appear.
    let stranger = user(&db, "stranger", false).await;
    post_at(&db, stranger.id, "unrelated", None, ago(5)).await;

    let page = get_feed(&db, viewer.id, None, None).await.unwrap();
    let ids: Vec<i32> = page.items.iter().map(|i| i.post.id).collect();
    assert_eq!(ids, vec![p3.id, p2.id, p1.id]);
    assert!(page.next_cursor.is_none());
    assert!(page.items.iter().all(|i| i.reposted_by.is_none()));
}

#[tokio::test]
async fn feed_includes_followee_reposts_with_repost_timestamp() {
    let db = setup().await;
    let viewer = user(&db, "viewer", false).await;
    let alice = user(&db, "alice", false).await;
    let carol = user(&db, "carol", false).await;
    follow(&db, viewer.id, alice.id).await;

    let old = post_at(&db, carol.id, "old gem", None, ago(600)).await;
    let recent = post_at(&db, alice.id, "fresh", None, ago(20)).await;
    repost_at(&db, alice.id, old.id, ago(10)).await;

    let page = get_feed(&db, viewer.id, None, None).await.unwrap();
    let ids: Vec<i32> = page.items.iter().map(|i| i.post.id).collect();
    // The repost surfaces with the repost's timestamp, so it outranks the
    // older direct post.
    assert_eq!(ids, vec![old.id, recent.id]);
    assert_eq!(
        page.items[0].reposted_by.as_ref().map(|u| u.id),
        Some(alice.id)
    );
    assert!(page.items[0].feed_timestamp > page.items[0].post.created_at);
}

#[tokio::test]
async fn self_repost_is_shown_once_as_direct_post() {
    let db = setup().await;
    let viewer = user(&db, "viewer", false).await;
    let alice = user(&db, "alice", false).await;
    follow(&db, viewer.id, alice.id).await;

    let p = post_at(&db, alice.id, "my own post", None, ago(30)).await;
    repost_at(&db, alice.id, p.id, ago(5)).await;

    let page = get_feed(&db, viewer.id, None, None).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].post.id, p.id);
    assert!(page.items[0].reposted_by.is_none());
    assert_eq!(page.items[0].feed_timestamp, page.items[0].post.created_at);
}

#[tokio::test]
async fn double_repost_is_attributed_to_most_recent_reposter() {
    let db = setup().await;
    let viewer = user(&db, "viewer", false).await;
    let alice = user(&db, "alice", false).await;
    let bob = user(&db, "bob", false).await;
    let carol = user(&db, "carol", false).await;
    follow(&db, viewer.id, alice.id).await;
    follow(&db, viewer.id, bob.id).await;

    let p = post_at(&db, carol.id, "viral", None, ago(120)).await;
    repost_at(&db, alice.id, p.id, ago(10)).await;
    repost_at(&db, bob.id, p.id, ago(5)).await;

    let page = get_feed(&db, viewer.id, None, None).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].post.id, p.id);
    assert_eq!(
        page.items[0].reposted_by.as_ref().map(|u| u.id),
        Some(bob.id)
    );
}

#[tokio::test]
async fn repost_of_invisible_private_author_is_dropped() {
    let db = setup().await;
    let viewer = user(&db, "viewer", false).await;
    let alice = user(&db, "alice", false).await;
    let hermit = user(&db, "hermit", true).await;
    follow(&db, viewer.id, alice.id).await;

    let hidden = post_at(&db, hermit.id, "secret", None, ago(60)).await;
    repost_at(&db, alice.id, hidden.id, ago(5)).await;

    let page = get_feed(&db, viewer.id, None, None).await.unwrap();
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn feed_pagination_concatenates_to_the_full_timeline() {
    let db = setup().await;
    let viewer = user(&db, "viewer", false).await;
    let alice = user(&db, "alice", false).await;
    follow(&db, viewer.id, alice.id).await;

    for i in 0..5 {
        post_at(&db, alice.id, &format!("post {i}"), None, ago(60 - i)).await;
    }

    let full = get_feed(&db, viewer.id, Some(50), None).await.unwrap();
    let full_ids: Vec<i32> = full.items.iter().map(|i| i.post.id).collect();
    assert_eq!(full_ids.len(), 5);

    let mut paged_ids = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = get_feed(&db, viewer.id, Some(2), cursor.as_deref())
            .await
            .unwrap();
        paged_ids.extend(page.items.iter().map(|i| i.post.id));
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }
    assert_eq!(paged_ids, full_ids);
}

#[tokio::test]
async fn feed_page_is_enriched_with_counts_and_viewer_flags() {
    let db = setup().await;
    let viewer = user(&db, "viewer", false).await;
    let alice = user(&db, "alice", false).await;
    let bob = user(&db, "bob", false).await;
    follow(&db, viewer.id, alice.id).await;

    let p = post_at(&db, alice.id, "popular", None, ago(30)).await;
    like_at(&db, viewer.id, p.id, ago(20)).await;
    like_at(&db, bob.id, p.id, ago(19)).await;
    repost_at(&db, bob.id, p.id, ago(18)).await;
    post_at(&db, bob.id, "a reply", Some(p.id), ago(17)).await;

    let page = get_feed(&db, viewer.id, None, None).await.unwrap();
    let item = page.items.iter().find(|i| i.post.id == p.id).unwrap();
    assert_eq!(item.post.engagement.like_count, 2);
    assert_eq!(item.post.engagement.repost_count, 1);
    assert_eq!(item.post.engagement.reply_count, 1);
    assert!(item.post.engagement.liked_by_viewer);
    assert!(!item.post.engagement.reposted_by_viewer);
}

#[tokio::test]
async fn reply_in_feed_carries_parent_author() {
    let db = setup().await;
    let viewer = user(&db, "viewer", false).await;
    let alice = user(&db, "alice", false).await;
    let bob = user(&db, "bob", false).await;
    follow(&db, viewer.id, alice.id).await;
    follow(&db, viewer.id, bob.id).await;

    let root = post_at(&db, bob.id, "root", None, ago(30)).await;
    let reply = post_at(&db, alice.id, "reply", Some(root.id), ago(10)).await;

    let page = get_feed(&db, viewer.id, None, None).await.unwrap();
    let item = page.items.iter().find(|i| i.post.id == reply.id).unwrap();
    assert_eq!(
        item.post.parent_author.as_ref().map(|u| u.id),
        Some(bob.id)
    );
}
