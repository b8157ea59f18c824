//! Bearer Token Guard
//! Mission: Resolve the caller before any protected handler touches data
//!
//! Handlers call [`require_user`] first and pass the returned `User` on
//! explicitly. Nothing is stashed in request extensions.

use crate::api::{blocking, ApiError, AppState};
use crate::models::User;
use axum::http::HeaderMap;
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

/// Pull the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
        .ok_or(ApiError::NotAuthenticated)
}

/// Resolve the current user from the request's bearer token.
pub async fn require_user(state: &AppState, headers: &HeaderMap) -> Result<User, ApiError> {
    let token = bearer_token(headers)?;
    let auth = state.auth.clone();
    blocking(move || Ok(auth.resolve_current_user(&token)?)).await
}
