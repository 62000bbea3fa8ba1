//! Session issuance and resolution for the Bearer-token middleware.

use chrono::{Duration, Utc};
use entity::{session, user};
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, Set};

use crate::{views::UserSummary, ServiceError};

const SESSION_TTL_DAYS: i64 = 30;

/// Issues a session for an existing account, identified by email.
pub async fn login(
    db: &DbConn,
    email: &str,
    token: String,
) -> Result<(String, UserSummary), ServiceError> {
    let user = user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("user"))?;

    let now = Utc::now();

    // Opportunistic cleanup; expired rows are dead weight and resolve()
    // rejects them anyway.
    session::Entity::delete_many()
        .filter(session::Column::ExpiresAt.lt(now))
        .exec(db)
        .await?;

    let session = session::ActiveModel {
        token: Set(token),
        user_id: Set(user.id),
        created_at: Set(now),
        expires_at: Set(now + Duration::days(SESSION_TTL_DAYS)),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok((session.token, user.into()))
}

/// Resolves a Bearer token to its user. Unknown or expired tokens are
/// Unauthorized.
pub async fn resolve(db: &DbConn, token: &str) -> Result<user::Model, ServiceError> {
    let (session, user) = session::Entity::find()
        .filter(session::Column::Token.eq(token))
        .find_also_related(user::Entity)
        .one(db)
        .await?
        .ok_or(ServiceError::Unauthorized)?;

    if session.expires_at < Utc::now() {
        return Err(ServiceError::Unauthorized);
    }
    user.ok_or(ServiceError::Unauthorized)
}
