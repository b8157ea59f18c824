//! Authentication API Endpoints
//! Mission: Token issuance and refresh

use crate::api::{blocking, ApiError, AppState};
use crate::auth::{
    middleware::bearer_token,
    models::{LoginForm, TokenPair},
};
use axum::{extract::State, http::HeaderMap, Form, Json};
use tracing::info;

/// Login endpoint - POST /auth/token
pub async fn login_for_access_token(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenPair>, ApiError> {
    info!("Login attempt: {}", form.username);

    let pair = blocking(move || Ok(state.auth.authenticate(&form.username, &form.password)?))
        .await?;

    Ok(Json(pair))
}

/// Refresh endpoint - POST /auth/refresh_token
pub async fn refresh_access_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TokenPair>, ApiError> {
    let token = bearer_token(&headers)?;

    let pair = blocking(move || Ok(state.auth.refresh(&token)?)).await?;

    Ok(Json(pair))
}
