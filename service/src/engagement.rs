//! Batched engagement enrichment: like/repost/reply counts and the viewer's
//! own interaction flags for a page of post ids, computed with grouped
//! aggregates issued concurrently rather than per post.

use std::collections::{HashMap, HashSet};

use entity::{like, post, repost};
use futures_util::try_join;
use sea_orm::{ColumnTrait, DbConn, EntityTrait, QueryFilter, QuerySelect};

use crate::{views::Engagement, ServiceError};

#[derive(Debug, Default)]
pub struct EngagementMap {
    like_counts: HashMap<i32, i64>,
    repost_counts: HashMap<i32, i64>,
    reply_counts: HashMap<i32, i64>,
    liked: HashSet<i32>,
    reposted: HashSet<i32>,
}

impl EngagementMap {
    pub fn for_post(&self, post_id: i32) -> Engagement {
        Engagement {
            like_count: self.like_counts.get(&post_id).copied().unwrap_or(0),
            repost_count: self.repost_counts.get(&post_id).copied().unwrap_or(0),
            reply_count: self.reply_counts.get(&post_id).copied().unwrap_or(0),
            liked_by_viewer: self.liked.contains(&post_id),
            reposted_by_viewer: self.reposted.contains(&post_id),
        }
    }
}

pub async fn load(
    db: &DbConn,
    post_ids: &[i32],
    viewer_id: Option<i32>,
) -> Result<EngagementMap, ServiceError> {
    if post_ids.is_empty() {
        return Ok(EngagementMap::default());
    }
    let ids = post_ids.to_vec();

    let like_counts = like::Entity::find()
        .select_only()
        .column(like::Column::PostId)
        .column_as(like::Column::Id.count(), "count")
        .filter(like::Column::PostId.is_in(ids.clone()))
        .group_by(like::Column::PostId)
        .into_tuple::<(i32, i64)>()
        .all(db);

    let repost_counts = repost::Entity::find()
        .select_only()
        .column(repost::Column::PostId)
        .column_as(repost::Column::Id.count(), "count")
        .filter(repost::Column::PostId.is_in(ids.clone()))
        .group_by(repost::Column::PostId)
        .into_tuple::<(i32, i64)>()
        .all(db);

    let reply_counts = post::Entity::find()
        .select_only()
        .column(post::Column::ParentPostId)
        .column_as(post::Column::Id.count(), "count")
        .filter(post::Column::ParentPostId.is_in(ids.clone()))
        .group_by(post::Column::ParentPostId)
        .into_tuple::<(Option<i32>, i64)>()
        .all(db);

    let (like_counts, repost_counts, reply_counts) =
        try_join!(like_counts, repost_counts, reply_counts)?;

    let mut map = EngagementMap {
        like_counts: like_counts.into_iter().collect(),
        repost_counts: repost_counts.into_iter().collect(),
        reply_counts: reply_counts
            .into_iter()
            .filter_map(|(parent, count)| parent.map(|id| (id, count)))
            .collect(),
        ..Default::default()
    };

    if let Some(viewer_id) = viewer_id {
        let liked = like::Entity::find()
            .select_only()
            .column(like::Column::PostId)
            .filter(like::Column::UserId.eq(viewer_id))
            .filter(like::Column::PostId.is_in(ids.clone()))
            .into_tuple::<i32>()
            .all(db);

        let reposted = repost::Entity::find()
            .select_only()
            .column(repost::Column::PostId)
            .filter(repost::Column::UserId.eq(viewer_id))
            .filter(repost::Column::PostId.is_in(ids))
            .into_tuple::<i32>()
            .all(db);

        let (liked, reposted) = try_join!(liked, reposted)?;
        map.liked = liked.into_iter().collect();
        map.reposted = reposted.into_iter().collect();
    }

    Ok(map)
}
