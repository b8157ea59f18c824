use axum::{
    middleware,
    response::{Html, Json},
    routing::{get, patch, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::{todos, users};
use crate::auth::{api as auth_api, clock::Clock, AuthService};
use crate::config::AuthConfig;
use crate::db::Database;
use crate::middleware::request_logging;
use crate::models::Message;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(db: Arc<Database>, config: &AuthConfig, clock: Arc<dyn Clock>) -> anyhow::Result<Self> {
        let auth = AuthService::new(config, db.clone(), clock)?;
        Ok(Self {
            db,
            auth: Arc::new(auth),
        })
    }
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/auth/token", post(auth_api::login_for_access_token))
        .route("/auth/refresh_token", post(auth_api::refresh_access_token));

    let user_routes = Router::new()
        .route("/users/", post(users::create_user).get(users::list_users))
        .route(
            "/users/:id",
            get(users::find_user)
                .put(users::update_user)
                .delete(users::delete_user),
        );

    let todo_routes = Router::new()
        .route("/todos/", post(todos::create_todo).get(todos::list_todos))
        .route("/todos/:id", patch(todos::patch_todo).delete(todos::delete_todo));

    Router::new()
        .route("/", get(read_root))
        .route("/html", get(read_root_html))
        .route("/health", get(health_check))
        .merge(auth_routes)
        .merge(user_routes)
        .merge(todo_routes)
        .with_state(state)
        .layer(middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ===== Route Handlers =====

async fn read_root() -> Json<Message> {
    Json(Message::new("Olá Mundo!"))
}

async fn read_root_html() -> Html<&'static str> {
    Html(
        r#"<html>
  <head>
    <title> Nosso olá mundo!</title>
  </head>
  <body>
    <h1> Olá Mundo </h1>
  </body>
</html>"#,
    )
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}
