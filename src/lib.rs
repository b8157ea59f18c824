//! FastZero Backend Library
//!
//! Users and todos over HTTP, guarded by JWT bearer tokens.
//! Exposes the router and its building blocks for the binary and tests.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod middleware;
pub mod models;

pub use api::{create_router, AppState};
pub use config::{AuthConfig, Config};
