pub mod error;
pub mod extract;
pub mod routes;
pub mod todos;
pub mod users;

pub use error::ApiError;
pub use routes::{create_router, AppState};

/// Run store and bcrypt work on the blocking pool, off the async workers.
pub async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Internal(anyhow::Error::new(e).context("Blocking task failed")))?
}
