//! Authentication Models
//! Mission: Token payloads, login forms and the two caller-facing failures

use serde::{Deserialize, Serialize};

pub const TOKEN_TYPE_BEARER: &str = "bearer";

/// JWT Claims payload
///
/// `sub` is optional on purpose: decoding tolerates a missing subject and
/// the session resolver rejects it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>, // user's email
    pub exp: i64,            // expiration, unix seconds
}

/// Token descriptor returned by login and refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub token_type: String,
}

impl TokenPair {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
        }
    }
}

/// Form-encoded login credentials. `username` carries the email.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Token decode failure. Deliberately carries no reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("invalid token")]
    InvalidToken,
}

/// Failures of the session security subsystem
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown email or wrong password; the two are indistinguishable.
    #[error("Incorrect email or password")]
    InvalidCredentials,
    /// Bad, expired, subject-less or orphaned token.
    #[error("Could not validate credentials")]
    Unauthorized,
    /// User store (or signing) failure, passed through untouched.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl From<TokenError> for AuthError {
    fn from(_: TokenError) -> Self {
        AuthError::Unauthorized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_without_sub_round_trip_through_json() {
        let claims = Claims { sub: None, exp: 42 };
        let json = serde_json::to_string(&claims).unwrap();
        assert_eq!(json, r#"{"exp":42}"#);

        let parsed: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, claims);
    }

    #[test]
    fn test_token_pair_is_bearer() {
        let pair = TokenPair::bearer("abc".to_string());
        let json = serde_json::to_value(&pair).unwrap();

        assert_eq!(json["access_token"], "abc");
        assert_eq!(json["token_type"], "bearer");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Incorrect email or password"
        );
        assert_eq!(
            AuthError::Unauthorized.to_string(),
            "Could not validate credentials"
        );
        assert!(matches!(
            AuthError::from(TokenError::InvalidToken),
            AuthError::Unauthorized
        ));
    }
}
