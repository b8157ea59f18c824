use crate::auth::AuthError;
use crate::db::WriteError;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// HTTP-facing errors. Bodies are `{"detail": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    /// No usable `Authorization: Bearer` header.
    NotAuthenticated,
    InvalidCredentials,
    Unauthorized,
    Forbidden,
    NotFound(&'static str),
    Conflict(&'static str),
    /// Malformed path parameter.
    InvalidPath(String),
    Internal(anyhow::Error),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::Unauthorized => ApiError::Unauthorized,
            AuthError::Store(e) => ApiError::Internal(e),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl From<WriteError> for ApiError {
    fn from(err: WriteError) -> Self {
        match err {
            WriteError::Conflict => ApiError::Conflict("Username or Email already exists"),
            WriteError::Other(e) => ApiError::Internal(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotAuthenticated => (StatusCode::UNAUTHORIZED, "Not authenticated"),
            ApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Incorrect email or password")
            }
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Could not validate credentials"),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "Not enough permissions"),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, *msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, *msg),
            ApiError::InvalidPath(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.as_str()),
            ApiError::Internal(err) => {
                tracing::error!("Internal error: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({ "detail": message }));

        if status == StatusCode::UNAUTHORIZED {
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}
