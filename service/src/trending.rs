//! Explore surface: engagement-ranked trending posts, hashtag trending,
//! search, the discover feed and follow suggestions.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use entity::{hashtag, like, post, post_hashtag, repost, user};
use futures_util::try_join;
use sea_orm::{
    sea_query::Query as SeaQuery, ColumnTrait, Condition, DbConn, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, QueryTrait,
};
use serde::Deserialize;

use crate::{
    engagement, page,
    page::Page,
    post as post_service,
    views::{HashtagView, PostView, TrendingPost, UserSummary},
    visibility, ServiceError,
};

/// Repost weight in the engagement score: likes + 2 x reposts.
const REPOST_WEIGHT: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
}

impl Timeframe {
    fn window(self) -> Duration {
        match self {
            Timeframe::Day => Duration::hours(24),
            Timeframe::Week => Duration::days(7),
            Timeframe::Month => Duration::days(30),
        }
    }
}

/// Posts created within the timeframe, ranked by likes + 2 x reposts
/// received within it. Ties order newest first, then by id, so ranking does
/// not depend on database ordering quirks. Viewer flags are populated only
/// when a viewer is present.
pub async fn trending_posts(
    db: &DbConn,
    viewer_id: Option<i32>,
    limit: Option<u64>,
    timeframe: Timeframe,
) -> Result<Vec<TrendingPost>, ServiceError> {
    let limit = page::clamp_limit(limit) as usize;
    let since = Utc::now() - timeframe.window();

    let like_counts = like::Entity::find()
        .select_only()
        .column(like::Column::PostId)
        .column_as(like::Column::Id.count(), "count")
        .filter(like::Column::CreatedAt.gte(since))
        .group_by(like::Column::PostId)
        .into_tuple::<(i32, i64)>()
        .all(db);

    let repost_counts = repost::Entity::find()
        .select_only()
        .column(repost::Column::PostId)
        .column_as(repost::Column::Id.count(), "count")
        .filter(repost::Column::CreatedAt.gte(since))
        .group_by(repost::Column::PostId)
        .into_tuple::<(i32, i64)>()
        .all(db);

    let (like_counts, repost_counts) = try_join!(like_counts, repost_counts)?;

    let mut scores: HashMap<i32, i64> = HashMap::new();
    for (post_id, count) in like_counts {
        *scores.entry(post_id).or_default() += count;
    }
    for (post_id, count) in repost_counts {
        *scores.entry(post_id).or_default() += REPOST_WEIGHT * count;
    }
    if scores.is_empty() {
        return Ok(Vec::new());
    }

    let visible = visibility::visible_private_authors(db, viewer_id).await?;
    let candidate_ids: Vec<i32> = scores.keys().copied().collect();

    let mut candidates: Vec<(post::Model, user::Model, i64)> = post::Entity::find()
        .find_also_related(user::Entity)
        .filter(post::Column::Id.is_in(candidate_ids))
        .filter(post::Column::CreatedAt.gte(since))
        .filter(visibility::author_filter(&visible))
        .all(db)
        .await?
        .into_iter()
        .filter_map(|(p, a)| {
            let a = a?;
            let score = scores.get(&p.id).copied().unwrap_or(0);
            Some((p, a, score))
        })
        .collect();

    candidates.sort_by(|(pa, _, sa), (pb, _, sb)| {
        sb.cmp(sa)
            .then(pb.created_at.cmp(&pa.created_at))
            .then(pb.id.cmp(&pa.id))
    });
    candidates.truncate(limit);

    let ids: Vec<i32> = candidates.iter().map(|(p, _, _)| p.id).collect();
    let engagement = engagement::load(db, &ids, viewer_id).await?;

    Ok(candidates
        .into_iter()
        .map(|(p, a, score)| TrendingPost {
            post: PostView::assemble(p, a, &engagement, None),
            engagement_score: score,
        })
        .collect())
}

/// Top hashtags by all-time usage counter; no time decay.
pub async fn trending_hashtags(
    db: &DbConn,
    limit: Option<u64>,
) -> Result<Vec<HashtagView>, ServiceError> {
    let limit = page::clamp_limit(limit);
    let tags = hashtag::Entity::find()
        .order_by_desc(hashtag::Column::UsageCount)
        .order_by_asc(hashtag::Column::Name)
        .limit(limit)
        .all(db)
        .await?;
    Ok(tags
        .into_iter()
        .map(|t| HashtagView {
            id: t.id,
            name: t.name,
            usage_count: t.usage_count,
        })
        .collect())
}

pub async fn posts_by_hashtag(
    db: &DbConn,
    viewer_id: Option<i32>,
    name: &str,
    limit: Option<u64>,
    cursor: Option<&str>,
) -> Result<Page<PostView>, ServiceError> {
    let name = name.trim_start_matches('#').to_lowercase();
    let tag = hashtag::Entity::find()
        .filter(hashtag::Column::Name.eq(name))
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("hashtag"))?;

    let membership = Condition::all().add(
        post::Column::Id.in_subquery(
            SeaQuery::select()
                .column(post_hashtag::Column::PostId)
                .from(post_hashtag::Entity)
                .and_where(post_hashtag::Column::HashtagId.eq(tag.id))
                .to_owned(),
        ),
    );

    visible_post_page(db, viewer_id, membership, limit, cursor).await
}

pub async fn search_posts(
    db: &DbConn,
    viewer_id: Option<i32>,
    query: &str,
    limit: Option<u64>,
    cursor: Option<&str>,
) -> Result<Page<PostView>, ServiceError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ServiceError::BadRequest("query must not be empty".into()));
    }
    let membership = Condition::all().add(post::Column::Content.contains(query));
    visible_post_page(db, viewer_id, membership, limit, cursor).await
}

/// Public posts from authors the viewer does not already follow.
pub async fn discover_feed(
    db: &DbConn,
    viewer_id: i32,
    limit: Option<u64>,
    cursor: Option<&str>,
) -> Result<Page<PostView>, ServiceError> {
    let mut excluded = visibility::followee_ids(db, viewer_id).await?;
    excluded.push(viewer_id);
    let membership = Condition::all()
        .add(post::Column::AuthorId.is_not_in(excluded))
        .add(user::Column::IsPrivate.eq(false));
    visible_post_page(db, Some(viewer_id), membership, limit, cursor).await
}

/// Shared shape of the explore list endpoints: a cursor-paginated page of
/// visible posts matching an extra condition, newest first, enriched.
async fn visible_post_page(
    db: &DbConn,
    viewer_id: Option<i32>,
    condition: Condition,
    limit: Option<u64>,
    cursor: Option<&str>,
) -> Result<Page<PostView>, ServiceError> {
    let limit = page::clamp_limit(limit);
    let before = page::parse_cursor(cursor)?;
    let visible = visibility::visible_private_authors(db, viewer_id).await?;

    let rows = post::Entity::find()
        .find_also_related(user::Entity)
        .filter(condition)
        .filter(visibility::author_filter(&visible))
        .apply_if(before, |q, ts| q.filter(post::Column::CreatedAt.lt(ts)))
        .order_by_desc(post::Column::CreatedAt)
        .limit(limit + 1)
        .all(db)
        .await?;

    let rows: Vec<(post::Model, user::Model)> = rows
        .into_iter()
        .filter_map(|(p, a)| a.map(|a| (p, a)))
        .collect();
    let (rows, next_cursor) = page::paginate(rows, limit, |(p, _)| p.created_at);

    let posts: Vec<post::Model> = rows.iter().map(|(p, _)| p.clone()).collect();
    let ids: Vec<i32> = posts.iter().map(|p| p.id).collect();
    let (engagement, parents) = try_join!(
        engagement::load(db, &ids, viewer_id),
        post_service::parent_authors(db, &posts),
    )?;

    let items = rows
        .into_iter()
        .map(|(p, a)| {
            let parent_author = p.parent_post_id.and_then(|id| parents.get(&id).cloned());
            PostView::assemble(p, a, &engagement, parent_author)
        })
        .collect();

    Ok(Page { items, next_cursor })
}

pub async fn search_users(
    db: &DbConn,
    query: &str,
    limit: Option<u64>,
    cursor: Option<&str>,
) -> Result<Page<UserSummary>, ServiceError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ServiceError::BadRequest("query must not be empty".into()));
    }
    let limit = page::clamp_limit(limit);
    let before = page::parse_cursor(cursor)?;

    let rows = user::Entity::find()
        .filter(user::Column::Name.contains(query))
        .apply_if(before, |q, ts| q.filter(user::Column::CreatedAt.lt(ts)))
        .order_by_desc(user::Column::CreatedAt)
        .limit(limit + 1)
        .all(db)
        .await?;

    let (rows, next_cursor) = page::paginate(rows, limit, |u| u.created_at);
    let items = rows.into_iter().map(UserSummary::from).collect();
    Ok(Page { items, next_cursor })
}

/// Users the viewer does not follow yet, newest accounts first. Unranked.
pub async fn suggested_users(
    db: &DbConn,
    viewer_id: i32,
    limit: Option<u64>,
) -> Result<Vec<UserSummary>, ServiceError> {
    let limit = page::clamp_limit(limit);
    let mut excluded = visibility::followee_ids(db, viewer_id).await?;
    excluded.push(viewer_id);

    let rows = user::Entity::find()
        .filter(user::Column::Id.is_not_in(excluded))
        .order_by_desc(user::Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await?;

    Ok(rows.into_iter().map(UserSummary::from).collect())
}
