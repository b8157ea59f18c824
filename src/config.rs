//! Application configuration
//!
//! Read once at startup from the environment (and `.env`), then shared
//! immutably.

use crate::auth::password::{DEFAULT_COST, MAX_COST, MIN_COST};
use anyhow::{bail, ensure, Context, Result};
use chrono::Duration;
use jsonwebtoken::Algorithm;
use std::{env, fmt, str::FromStr};
use tracing::warn;

const DEV_SECRET_KEY: &str = "dev-secret-change-in-production-minimum-32-characters";

/// Signing and hashing parameters for the session security subsystem.
#[derive(Clone)]
pub struct AuthConfig {
    pub secret_key: String,
    pub algorithm: Algorithm,
    pub access_token_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    pub fn from_env() -> Result<Self> {
        let secret_key = match env::var("SECRET_KEY") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ => {
                warn!("SECRET_KEY not set, falling back to the development secret");
                DEV_SECRET_KEY.to_string()
            }
        };

        let algorithm = parse_algorithm(
            &env::var("ALGORITHM").unwrap_or_else(|_| "HS256".to_string()),
        )?;

        let access_token_ttl = parse_token_ttl(
            &env::var("ACCESS_TOKEN_EXPIRE_MINUTES").unwrap_or_else(|_| "30".to_string()),
        )?;

        let bcrypt_cost: u32 = env::var("BCRYPT_COST")
            .unwrap_or_else(|_| DEFAULT_COST.to_string())
            .parse()
            .context("Invalid BCRYPT_COST")?;
        ensure!(
            (MIN_COST..=MAX_COST).contains(&bcrypt_cost),
            "BCRYPT_COST must be between {} and {}",
            MIN_COST,
            MAX_COST
        );

        Ok(Self {
            secret_key,
            algorithm,
            access_token_ttl,
            bcrypt_cost,
        })
    }
}

// Never print the secret.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret_key", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// Only symmetric HMAC algorithms make sense with a shared secret.
pub fn parse_algorithm(name: &str) -> Result<Algorithm> {
    let algorithm = Algorithm::from_str(name.trim())
        .with_context(|| format!("Unknown signing algorithm: {}", name))?;

    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        other => bail!("Signing algorithm {:?} is not an HMAC algorithm", other),
    }
}

/// Token lifetime in whole minutes. Must be positive and representable.
pub fn parse_token_ttl(minutes: &str) -> Result<Duration> {
    let minutes: i64 = minutes
        .trim()
        .parse()
        .context("Invalid ACCESS_TOKEN_EXPIRE_MINUTES")?;
    ensure!(minutes > 0, "ACCESS_TOKEN_EXPIRE_MINUTES must be positive");

    Duration::try_minutes(minutes).context("ACCESS_TOKEN_EXPIRE_MINUTES out of range")
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub port: u16,
    pub auth: AuthConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./fastzero.db".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .context("Invalid PORT")?;

        Ok(Self {
            database_path,
            port,
            auth: AuthConfig::from_env()?,
        })
    }
}
