//! Private-account visibility: a user's content is visible to a viewer iff
//! the author is not private, the viewer is the author, or the viewer
//! follows the author. Recomputed per request from the follow table.

use std::collections::HashSet;

use entity::{follow, user};
use sea_orm::{ColumnTrait, Condition, DbConn, EntityTrait, QueryFilter, QuerySelect};

use crate::ServiceError;

/// Ids of the viewer's followees.
pub async fn followee_ids(db: &DbConn, viewer_id: i32) -> Result<Vec<i32>, ServiceError> {
    let ids = follow::Entity::find()
        .select_only()
        .column(follow::Column::FollowingId)
        .filter(follow::Column::FollowerId.eq(viewer_id))
        .into_tuple::<i32>()
        .all(db)
        .await?;
    Ok(ids)
}

/// Private authors whose content the viewer may see: self plus followees.
/// An anonymous viewer sees no private authors.
pub async fn visible_private_authors(
    db: &DbConn,
    viewer_id: Option<i32>,
) -> Result<HashSet<i32>, ServiceError> {
    let Some(viewer_id) = viewer_id else {
        return Ok(HashSet::new());
    };
    let mut visible: HashSet<i32> = followee_ids(db, viewer_id).await?.into_iter().collect();
    visible.insert(viewer_id);
    Ok(visible)
}

/// The visibility predicate gating every read path that returns posts.
pub fn can_view(author_id: i32, author_is_private: bool, visible: &HashSet<i32>) -> bool {
    !author_is_private || visible.contains(&author_id)
}

/// SQL form of the predicate for queries joined to the author: public
/// account, or an author in the viewer's visible set.
pub fn author_filter(visible: &HashSet<i32>) -> Condition {
    Condition::any()
        .add(user::Column::IsPrivate.eq(false))
        .add(user::Column::Id.is_in(visible.iter().copied().collect::<Vec<_>>()))
}
