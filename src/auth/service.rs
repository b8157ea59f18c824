//! Session Security Service
//! Mission: Login, current-user resolution and token refresh

use crate::auth::{
    clock::Clock,
    jwt::JwtHandler,
    models::{AuthError, Claims, TokenPair},
    password::PasswordHasher,
};
use crate::config::AuthConfig;
use crate::models::User;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The slice of the user store the security subsystem needs.
pub trait UserLookup: Send + Sync {
    /// Find a user by email, the stable identifier carried in `sub`.
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
}

/// Stateless apart from the immutable signing config and the clock.
pub struct AuthService {
    jwt: JwtHandler,
    hasher: PasswordHasher,
    users: Arc<dyn UserLookup>,
    /// Verified against when the email is unknown, so both failed-login
    /// paths pay for one bcrypt verify at the configured cost.
    dummy_hash: String,
}

impl AuthService {
    pub fn new(
        config: &AuthConfig,
        users: Arc<dyn UserLookup>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let hasher = PasswordHasher::new(config.bcrypt_cost)?;
        let dummy_hash = hasher.hash("fastzero-unknown-user")?;

        Ok(Self {
            jwt: JwtHandler::new(config, clock),
            hasher,
            users,
            dummy_hash,
        })
    }

    pub fn jwt(&self) -> &JwtHandler {
        &self.jwt
    }

    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    /// Exchange email and password for a bearer token.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        let user = self.users.find_user_by_email(email)?;
        let password_hash = user
            .as_ref()
            .map_or(self.dummy_hash.as_str(), |u| u.password.as_str());
        let verified = self.hasher.verify(password, password_hash);

        let user = match user {
            Some(user) if verified => user,
            _ => {
                warn!("Failed login attempt: {}", email);
                return Err(AuthError::InvalidCredentials);
            }
        };

        let token = self.jwt.encode(&user.email, self.jwt.now())?;
        info!("Login successful: {} ({})", user.username, user.id);

        Ok(TokenPair::bearer(token))
    }

    /// Turn a bearer token into the user it speaks for.
    ///
    /// Read-only. Every failure is the same `Unauthorized`.
    pub fn resolve_current_user(&self, token: &str) -> Result<User, AuthError> {
        self.resolve_at(token, self.jwt.now()).map(|(user, _claims)| user)
    }

    /// Issue a fresh token for the holder of a still-valid one. The old
    /// token is not revoked and stays valid until its own `exp`.
    ///
    /// The new `exp` is always strictly later than the old one, even when
    /// the refresh lands in the same second the old token was issued.
    pub fn refresh(&self, token: &str) -> Result<TokenPair, AuthError> {
        let now = self.jwt.now();
        let (user, claims) = self.resolve_at(token, now)?;

        let exp = self.jwt.expiry_for(now)?.max(claims.exp.saturating_add(1));
        let token = self.jwt.encode_claims(&Claims {
            sub: Some(user.email.clone()),
            exp,
        })?;
        debug!("Refreshed token for {}, expires at {}", user.email, exp);

        Ok(TokenPair::bearer(token))
    }

    fn resolve_at(
        &self,
        token: &str,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<(User, Claims), AuthError> {
        let claims = self.jwt.decode_at(token, now)?;
        let subject = claims.sub.as_deref().ok_or(AuthError::Unauthorized)?;

        match self.users.find_user_by_email(subject)? {
            Some(user) => Ok((user, claims)),
            None => {
                debug!("Token subject {} no longer exists", subject);
                Err(AuthError::Unauthorized)
            }
        }
    }
}
