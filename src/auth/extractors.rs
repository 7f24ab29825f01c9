use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::COOKIE, request::Parts, HeaderMap},
};
use tracing::warn;

use crate::auth::{jwt::SessionKeys, repo::Session};
use crate::error::ApiError;
use crate::state::AppState;

/// Value of the `session` cookie, if the request carries one.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().strip_prefix("session="))
        .find(|token| !token.is_empty())
}

/// Authenticated caller: a verified token whose session is still live.
pub struct AuthUser {
    pub user_id: i64,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or_else(ApiError::unauthorized)?;

        let keys = SessionKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|_| {
            warn!("invalid or expired session token");
            ApiError::unauthorized()
        })?;

        match Session::owner(&state.db, claims.sid).await {
            Some(owner) if owner == claims.sub => Ok(AuthUser {
                user_id: claims.sub,
            }),
            _ => {
                warn!(user_id = claims.sub, sid = %claims.sid, "session revoked");
                Err(ApiError::unauthorized())
            }
        }
    }
}
