//! Hashtag extraction and post association. Runs on the post-creation
//! transaction so the usage counter and junction rows stay consistent with
//! the post itself.

use chrono::{DateTime, Utc};
use entity::{hashtag, post_hashtag};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::ServiceError;

/// Extracts `#tag` tokens: a '#' followed by alphanumerics or underscores.
/// Tags are lowercased and deduplicated, first occurrence order preserved.
pub fn extract_hashtags(content: &str) -> Vec<String> {
    let mut tags = Vec::new();
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '#' {
            continue;
        }
        let mut tag = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_alphanumeric() || next == '_' {
                tag.push(next);
                chars.next();
            } else {
                break;
            }
        }
        if !tag.is_empty() {
            let tag = tag.to_lowercase();
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
    }

    tags
}

pub(crate) async fn associate<C: ConnectionTrait>(
    db: &C,
    post_id: i32,
    content: &str,
    now: DateTime<Utc>,
) -> Result<(), ServiceError> {
    for name in extract_hashtags(content) {
        let existing = hashtag::Entity::find()
            .filter(hashtag::Column::Name.eq(name.as_str()))
            .one(db)
            .await?;

        let tag_id = match existing {
            Some(tag) => {
                let usage = tag.usage_count + 1;
                let mut active: hashtag::ActiveModel = tag.into();
                active.usage_count = Set(usage);
                active.updated_at = Set(now);
                active.update(db).await?.id
            }
            None => {
                hashtag::ActiveModel {
                    name: Set(name),
                    usage_count: Set(1),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(db)
                .await?
                .id
            }
        };

        post_hashtag::ActiveModel {
            post_id: Set(post_id),
            hashtag_id: Set(tag_id),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    Ok(())
}
