use crate::api::{blocking, ApiError, AppState};
use crate::auth::require_user;
use crate::models::{FilterPage, Message, UserList, UserPublic, UserSchema};
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use super::extract::IdPath;

/// POST /users/
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<UserSchema>,
) -> Result<(StatusCode, Json<UserPublic>), ApiError> {
    let user = blocking(move || {
        if let Some(existing) = state
            .db
            .find_user_conflict(&payload.username, &payload.email)?
        {
            let detail = if existing.username == payload.username {
                "Username already exists"
            } else {
                "E-mail already exists"
            };
            return Err(ApiError::Conflict(detail));
        }

        let password_hash = state.auth.hasher().hash(&payload.password)?;
        Ok(state
            .db
            .create_user(&payload.username, &payload.email, &password_hash)?)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(UserPublic::from_user(&user))))
}

/// GET /users/
pub async fn list_users(
    State(state): State<AppState>,
    Query(page): Query<FilterPage>,
) -> Result<Json<UserList>, ApiError> {
    let users = blocking(move || Ok(state.db.list_users(page.offset, page.limit)?)).await?;

    Ok(Json(UserList {
        users: users.iter().map(UserPublic::from_user).collect(),
    }))
}

/// GET /users/:id
pub async fn find_user(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
) -> Result<Json<UserPublic>, ApiError> {
    blocking(move || Ok(state.db.get_user(user_id)?))
        .await?
        .map(|user| Json(UserPublic::from_user(&user)))
        .ok_or(ApiError::NotFound("User not found"))
}

/// PUT /users/:id - only the account owner
pub async fn update_user(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
    headers: HeaderMap,
    Json(payload): Json<UserSchema>,
) -> Result<Json<UserPublic>, ApiError> {
    let current_user = require_user(&state, &headers).await?;

    if current_user.id != user_id {
        return Err(ApiError::Forbidden);
    }

    let user = blocking(move || {
        let password_hash = state.auth.hasher().hash(&payload.password)?;
        state
            .db
            .update_user(
                current_user.id,
                &payload.username,
                &payload.email,
                &password_hash,
            )?
            .ok_or(ApiError::NotFound("User not found"))
    })
    .await?;

    Ok(Json(UserPublic::from_user(&user)))
}

/// DELETE /users/:id - only the account owner
pub async fn delete_user(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
    headers: HeaderMap,
) -> Result<Json<Message>, ApiError> {
    let current_user = require_user(&state, &headers).await?;

    if current_user.id != user_id {
        return Err(ApiError::Forbidden);
    }

    blocking(move || Ok(state.db.delete_user(current_user.id)?)).await?;

    Ok(Json(Message::new("User deleted!")))
}
