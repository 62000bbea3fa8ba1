//! Thread assembly: the ancestor chain of a post and the nested reply tree
//! beneath it. Both directions share one traversal cap so adversarial or
//! cyclic parent chains cannot stall a request.

use std::collections::{HashMap, HashSet};

use entity::{post, user};
use sea_orm::{
    ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait,
};

use crate::{
    engagement::{self, EngagementMap},
    page,
    page::Page,
    post as post_service,
    views::{PostView, ReplyNode, ThreadView, UserSummary},
    visibility, ServiceError,
};

/// Traversal budget applied to the ancestor walk and the descendant fetch
/// alike.
pub const MAX_DEPTH: usize = 50;

/// Ancestors of a post, root first, plus the post itself. An ancestor the
/// viewer cannot see is omitted while the chain continues past it.
pub async fn get_thread(
    db: &DbConn,
    viewer_id: Option<i32>,
    post_id: i32,
) -> Result<ThreadView, ServiceError> {
    let (post, author) = post_service::load_post_checked(db, viewer_id, post_id).await?;
    let visible = visibility::visible_private_authors(db, viewer_id).await?;

    let chain = ancestor_chain(db, &post, &visible, MAX_DEPTH).await?;

    let mut ids: Vec<i32> = chain.iter().map(|(p, _)| p.id).collect();
    ids.push(post.id);
    let engagement = engagement::load(db, &ids, viewer_id).await?;

    let ancestors = chain
        .into_iter()
        .map(|(p, a)| PostView::assemble(p, a, &engagement, None))
        .collect();

    let parents = post_service::parent_authors(db, std::slice::from_ref(&post)).await?;
    let parent_author = post.parent_post_id.and_then(|id| parents.get(&id).cloned());

    Ok(ThreadView {
        ancestors,
        post: PostView::assemble(post, author, &engagement, parent_author),
    })
}

async fn ancestor_chain(
    db: &DbConn,
    post: &post::Model,
    visible: &HashSet<i32>,
    max_depth: usize,
) -> Result<Vec<(post::Model, user::Model)>, ServiceError> {
    let mut chain = Vec::new();
    let mut current = post.parent_post_id;
    let mut hops = 0;

    while let Some(parent_id) = current {
        if hops >= max_depth {
            tracing::warn!(post_id = post.id, "ancestor walk hit the depth cap");
            break;
        }
        hops += 1;

        let Some((parent, parent_author)) = post::Entity::find_by_id(parent_id)
            .find_also_related(user::Entity)
            .one(db)
            .await?
        else {
            break;
        };
        let Some(parent_author) = parent_author else {
            break;
        };

        current = parent.parent_post_id;
        if visibility::can_view(parent.author_id, parent_author.is_private, visible) {
            chain.push((parent, parent_author));
        }
    }

    // Walked child-to-parent; present root-first.
    chain.reverse();
    Ok(chain)
}

/// Cursor-paginated direct replies to a post, each carrying its full nested
/// subtree. Every tree level is sorted newest first.
pub async fn get_post_replies(
    db: &DbConn,
    viewer_id: Option<i32>,
    post_id: i32,
    limit: Option<u64>,
    cursor: Option<&str>,
) -> Result<Page<ReplyNode>, ServiceError> {
    post_service::load_post_checked(db, viewer_id, post_id).await?;

    let limit = page::clamp_limit(limit);
    let before = page::parse_cursor(cursor)?;
    let visible = visibility::visible_private_authors(db, viewer_id).await?;

    let direct = post::Entity::find()
        .find_also_related(user::Entity)
        .filter(post::Column::ParentPostId.eq(post_id))
        .filter(visibility::author_filter(&visible))
        .apply_if(before, |q, ts| q.filter(post::Column::CreatedAt.lt(ts)))
        .order_by_desc(post::Column::CreatedAt)
        .limit(limit + 1)
        .all(db)
        .await?;

    let direct: Vec<(post::Model, user::Model)> = direct
        .into_iter()
        .filter_map(|(p, a)| a.map(|a| (p, a)))
        .collect();
    let (direct, next_cursor) = page::paginate(direct, limit, |(p, _)| p.created_at);

    let roots: Vec<i32> = direct.iter().map(|(p, _)| p.id).collect();
    let nested = descendant_posts(db, roots, &visible, MAX_DEPTH.saturating_sub(1)).await?;

    let mut all_posts: Vec<post::Model> = direct.iter().map(|(p, _)| p.clone()).collect();
    all_posts.extend(nested.iter().map(|(p, _)| p.clone()));
    let ids: Vec<i32> = all_posts.iter().map(|p| p.id).collect();

    let engagement = engagement::load(db, &ids, viewer_id).await?;
    let parents = post_service::parent_authors(db, &all_posts).await?;

    let mut children: HashMap<i32, Vec<(post::Model, user::Model)>> = HashMap::new();
    for (p, a) in nested {
        children.entry(p.parent_post_id.unwrap_or_default()).or_default().push((p, a));
    }
    for siblings in children.values_mut() {
        siblings.sort_by(|(a, _), (b, _)| {
            b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
        });
    }

    let items = direct
        .into_iter()
        .map(|(p, a)| build_node(p, a, &mut children, &engagement, &parents))
        .collect();

    Ok(Page { items, next_cursor })
}

/// Level-by-level descendant fetch: one query per tree depth, each level
/// filtered by visibility before it becomes the next level's parent set.
async fn descendant_posts(
    db: &DbConn,
    root_ids: Vec<i32>,
    visible: &HashSet<i32>,
    max_depth: usize,
) -> Result<Vec<(post::Model, user::Model)>, ServiceError> {
    let mut all = Vec::new();
    let mut frontier = root_ids;
    let mut depth = 0;

    while !frontier.is_empty() && depth < max_depth {
        depth += 1;
        let level = post::Entity::find()
            .filter(post::Column::ParentPostId.is_in(frontier))
            .find_also_related(user::Entity)
            .all(db)
            .await?;

        frontier = Vec::new();
        for (child, author) in level {
            let Some(author) = author else { continue };
            if visibility::can_view(child.author_id, author.is_private, visible) {
                frontier.push(child.id);
                all.push((child, author));
            }
        }
    }

    Ok(all)
}

fn build_node(
    post: post::Model,
    author: user::Model,
    children: &mut HashMap<i32, Vec<(post::Model, user::Model)>>,
    engagement: &EngagementMap,
    parents: &HashMap<i32, UserSummary>,
) -> ReplyNode {
    let replies = children
        .remove(&post.id)
        .unwrap_or_default()
        .into_iter()
        .map(|(p, a)| build_node(p, a, children, engagement, parents))
        .collect();
    let parent_author = post.parent_post_id.and_then(|id| parents.get(&id).cloned());
    ReplyNode {
        post: PostView::assemble(post, author, engagement, parent_author),
        replies,
    }
}
