// ABOUTME: Authentication context extractors for API requests
// ABOUTME: Resolves bearer session tokens into an explicit per-request user id

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};

use crate::error::ApiError;
use gameplan_storage::DbState;

/// Header name for the session token, for clients that prefer it over the
/// Authorization header.
pub const SESSION_TOKEN_HEADER: &str = "X-Session-Token";

/// Current authenticated user, resolved from the request's session token.
/// Handlers that require authentication take this as an argument; there is
/// no ambient session state.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: i64,
}

/// Anonymous-tolerant variant for pages that greet logged-out visitors.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<i64>);

/// Pull the session token out of the request headers, if any.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        if let Ok(value) = value.to_str() {
            if let Some(token) = value.strip_prefix("Bearer ") {
                return Some(token);
            }
        }
    }
    headers
        .get(SESSION_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
}

async fn resolve_user<S>(parts: &Parts, state: &S) -> Result<Option<i64>, ApiError>
where
    DbState: FromRef<S>,
{
    let token = match session_token(&parts.headers) {
        Some(token) => token,
        None => return Ok(None),
    };

    let db = DbState::from_ref(state);
    let session = db.session_storage.authenticate(token).await?;
    Ok(session.map(|s| s.user_id))
}

impl<S> FromRequestParts<S> for CurrentUser
where
    DbState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match resolve_user(parts, state).await? {
            Some(user_id) => Ok(CurrentUser { user_id }),
            None => Err(ApiError::unauthorized("Please log in first.")),
        }
    }
}

impl<S> FromRequestParts<S> for OptionalUser
where
    DbState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalUser(resolve_user(parts, state).await?))
    }
}
