//! JWT Token Handler
//! Mission: Generate and validate signed, time-bounded tokens

use crate::auth::{
    clock::Clock,
    models::{Claims, TokenError},
};
use crate::config::AuthConfig;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::debug;

/// JWT Handler for token operations
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtHandler {
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret_key.as_bytes()),
            algorithm: config.algorithm,
            ttl: config.access_token_ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// `exp` for a token issued at `issued_at`.
    pub fn expiry_for(&self, issued_at: DateTime<Utc>) -> Result<i64> {
        Ok(issued_at
            .checked_add_signed(self.ttl)
            .context("Invalid timestamp")?
            .timestamp())
    }

    /// Issue a token for `subject` expiring `ttl` after `issued_at`.
    pub fn encode(&self, subject: &str, issued_at: DateTime<Utc>) -> Result<String> {
        let expiration = self.expiry_for(issued_at)?;

        debug!("Generating JWT for {}, expires at {}", subject, expiration);

        self.encode_claims(&Claims {
            sub: Some(subject.to_string()),
            exp: expiration,
        })
    }

    /// Sign an arbitrary claim set as-is.
    pub fn encode_claims(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .context("Failed to generate JWT")
    }

    /// Validate a token against the handler's clock.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        self.decode_at(token, self.clock.now())
    }

    /// Validate signature, algorithm and `exp` presence, then reject the
    /// token once `now >= exp`. `sub` is not required here.
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                debug!("Rejected JWT: {:?}", e.kind());
                TokenError::InvalidToken
            })?
            .claims;

        if now.timestamp() >= claims.exp {
            debug!("Rejected JWT: expired at {}", claims.exp);
            return Err(TokenError::InvalidToken);
        }

        Ok(claims)
    }
}
