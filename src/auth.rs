//! Bearer-token session extractors. `CurrentUser` rejects missing or bad
//! tokens; `MaybeUser` is for the explore endpoints that work anonymously
//! but enrich with viewer flags when a session is present.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use entity::user;
use service::ServiceError;

use crate::{error::ApiError, state::AppState};

pub struct CurrentUser(pub user::Model);

pub struct MaybeUser(pub Option<user::Model>);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(ServiceError::Unauthorized)?;
        let user = service::auth::resolve(&state.conn, token).await?;
        Ok(CurrentUser(user))
    }
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(parts) {
            None => Ok(MaybeUser(None)),
            Some(token) => {
                let user = service::auth::resolve(&state.conn, token).await?;
                Ok(MaybeUser(Some(user)))
            }
        }
    }
}
