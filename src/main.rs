//! FastZero - users and todos behind bearer-token auth

use anyhow::{Context, Result};
use clap::Parser;
use fastzero_backend::{
    auth::SystemClock, create_router, db::Database, AppState, Config,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "fastzero")]
#[command(about = "FastZero users and todos API")]
struct Args {
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// SQLite database path (overrides DATABASE_PATH)
    #[arg(long)]
    database_path: Option<String>,

    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    init_tracing();

    let mut config = Config::from_env()?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(path) = args.database_path {
        config.database_path = path;
    }

    info!(
        "Auth configured: {:?}, token TTL {} min",
        config.auth.algorithm,
        config.auth.access_token_ttl.num_minutes()
    );

    let db = Arc::new(Database::new(&config.database_path)?);
    let state = AppState::new(db, &config.auth, Arc::new(SystemClock))?;
    let app = create_router(state);

    let addr = format!("{}:{}", args.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("API server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fastzero_backend=debug,fastzero=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
