//! Home feed assembly: a reverse-chronological, deduplicated merge of the
//! viewer's own posts, followees' posts and followees' reposts.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use entity::{post, repost, user};
use futures_util::try_join;
use sea_orm::{
    ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait,
};

use crate::{
    engagement, page,
    page::Page,
    post as post_service,
    views::{FeedItem, PostView, UserSummary},
    visibility, ServiceError,
};

struct Candidate {
    post: post::Model,
    author: user::Model,
    reposted_by: Option<UserSummary>,
    feed_timestamp: DateTime<Utc>,
}

pub async fn get_feed(
    db: &DbConn,
    viewer_id: i32,
    limit: Option<u64>,
    cursor: Option<&str>,
) -> Result<Page<FeedItem>, ServiceError> {
    let limit = page::clamp_limit(limit);
    let before = page::parse_cursor(cursor)?;

    let followees = visibility::followee_ids(db, viewer_id).await?;
    let mut authors = followees.clone();
    authors.push(viewer_id);

    // Direct posts and repost entries are bounded by the cursor on their own
    // timestamps and over-fetched by one row each, concurrently.
    let direct = post::Entity::find()
        .find_also_related(user::Entity)
        .filter(post::Column::AuthorId.is_in(authors))
        .apply_if(before, |q, ts| q.filter(post::Column::CreatedAt.lt(ts)))
        .order_by_desc(post::Column::CreatedAt)
        .limit(limit + 1)
        .all(db);

    let reposts = repost::Entity::find()
        .filter(repost::Column::UserId.is_in(followees))
        .apply_if(before, |q, ts| q.filter(repost::Column::CreatedAt.lt(ts)))
        .order_by_desc(repost::Column::CreatedAt)
        .limit(limit + 1)
        .all(db);

    let (direct, reposts) = try_join!(direct, reposts)?;

    let reposted_post_ids: Vec<i32> = reposts.iter().map(|r| r.post_id).collect();
    let reposter_ids: Vec<i32> = reposts.iter().map(|r| r.user_id).collect();

    let reposted_posts: HashMap<i32, (post::Model, user::Model)> = post::Entity::find()
        .filter(post::Column::Id.is_in(reposted_post_ids))
        .find_also_related(user::Entity)
        .all(db)
        .await?
        .into_iter()
        .filter_map(|(p, a)| a.map(|a| (p.id, (p, a))))
        .collect();

    let reposters: HashMap<i32, user::Model> = user::Entity::find()
        .filter(user::Column::Id.is_in(reposter_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let visible = visibility::visible_private_authors(db, Some(viewer_id)).await?;

    let direct_ids: HashSet<i32> = direct.iter().map(|(p, _)| p.id).collect();
    let mut candidates: Vec<Candidate> = direct
        .into_iter()
        .filter_map(|(p, a)| {
            a.map(|author| Candidate {
                feed_timestamp: p.created_at,
                reposted_by: None,
                post: p,
                author,
            })
        })
        .collect();

    // Dedup: a post already in the direct window never reappears as a
    // repost entry, and among reposts of one post only the most recent
    // occurrence survives. Reposted posts by invisible private authors are
    // dropped entirely.
    let mut seen_reposts: HashSet<i32> = HashSet::new();
    for repost in reposts {
        if direct_ids.contains(&repost.post_id) || !seen_reposts.insert(repost.post_id) {
            continue;
        }
        let Some((p, author)) = reposted_posts.get(&repost.post_id) else {
            continue;
        };
        if !visibility::can_view(p.author_id, author.is_private, &visible) {
            continue;
        }
        let Some(reposter) = reposters.get(&repost.user_id) else {
            continue;
        };
        candidates.push(Candidate {
            post: p.clone(),
            author: author.clone(),
            reposted_by: Some(UserSummary::from(reposter.clone())),
            feed_timestamp: repost.created_at,
        });
    }

    candidates.sort_by(|a, b| {
        b.feed_timestamp
            .cmp(&a.feed_timestamp)
            .then(b.post.id.cmp(&a.post.id))
    });

    let (candidates, next_cursor) = page::paginate(candidates, limit, |c| c.feed_timestamp);

    // Only the final page is enriched.
    let page_ids: Vec<i32> = candidates.iter().map(|c| c.post.id).collect();
    let page_posts: Vec<post::Model> = candidates.iter().map(|c| c.post.clone()).collect();
    let (engagement, parents) = try_join!(
        engagement::load(db, &page_ids, Some(viewer_id)),
        post_service::parent_authors(db, &page_posts),
    )?;

    let items = candidates
        .into_iter()
        .map(|c| {
            let parent_author = c
                .post
                .parent_post_id
                .and_then(|id| parents.get(&id).cloned());
            FeedItem {
                feed_timestamp: c.feed_timestamp,
                reposted_by: c.reposted_by,
                post: PostView::assemble(c.post, c.author, &engagement, parent_author),
            }
        })
        .collect();

    Ok(Page { items, next_cursor })
}
