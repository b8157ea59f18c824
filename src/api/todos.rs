use crate::api::{blocking, ApiError, AppState};
use crate::auth::require_user;
use crate::models::{FilterTodo, Message, TodoList, TodoPublic, TodoSchema, TodoUpdate};
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use super::extract::IdPath;

/// POST /todos/
pub async fn create_todo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<TodoSchema>,
) -> Result<(StatusCode, Json<TodoPublic>), ApiError> {
    let current_user = require_user(&state, &headers).await?;

    let todo = blocking(move || Ok(state.db.create_todo(current_user.id, &payload)?)).await?;

    Ok((StatusCode::CREATED, Json(TodoPublic::from_todo(&todo))))
}

/// GET /todos/ - the caller's todos, filtered
pub async fn list_todos(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(filter): Query<FilterTodo>,
) -> Result<Json<TodoList>, ApiError> {
    let current_user = require_user(&state, &headers).await?;

    let todos = blocking(move || Ok(state.db.list_todos(current_user.id, &filter)?)).await?;

    Ok(Json(TodoList {
        todos: todos.iter().map(TodoPublic::from_todo).collect(),
    }))
}

/// PATCH /todos/:id
pub async fn patch_todo(
    State(state): State<AppState>,
    IdPath(todo_id): IdPath,
    headers: HeaderMap,
    Json(patch): Json<TodoUpdate>,
) -> Result<Json<TodoPublic>, ApiError> {
    let current_user = require_user(&state, &headers).await?;

    blocking(move || Ok(state.db.update_todo(todo_id, current_user.id, &patch)?))
        .await?
        .map(|todo| Json(TodoPublic::from_todo(&todo)))
        .ok_or(ApiError::NotFound("Task not found"))
}

/// DELETE /todos/:id
pub async fn delete_todo(
    State(state): State<AppState>,
    IdPath(todo_id): IdPath,
    headers: HeaderMap,
) -> Result<Json<Message>, ApiError> {
    let current_user = require_user(&state, &headers).await?;

    if !blocking(move || Ok(state.db.delete_todo(todo_id, current_user.id)?)).await? {
        return Err(ApiError::NotFound("Task not found"));
    }

    Ok(Json(Message::new("Task has been deleted successfully.")))
}
