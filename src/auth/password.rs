//! Password Hashing
//! Mission: One-way salted bcrypt hashes, never stored in plaintext

use anyhow::{ensure, Context, Result};
use bcrypt::{hash, verify};

pub use bcrypt::DEFAULT_COST;

/// Lowest and highest work factors bcrypt accepts.
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// bcrypt hasher with a fixed work factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self> {
        ensure!(
            (MIN_COST..=MAX_COST).contains(&cost),
            "bcrypt cost must be between {} and {}, got {}",
            MIN_COST,
            MAX_COST,
            cost
        );
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password. The salt and cost are embedded in the output.
    pub fn hash(&self, secret: &str) -> Result<String> {
        hash(secret, self.cost).context("Failed to hash password")
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// A malformed hash is a failed verification, not an error. bcrypt
    /// compares digests in constant time.
    pub fn verify(&self, secret: &str, password_hash: &str) -> bool {
        verify(secret, password_hash).unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(MIN_COST).unwrap()
    }

    #[test]
    fn test_hash_then_verify() {
        let hasher = hasher();
        let hashed = hasher.hash("secret").unwrap();

        assert_ne!(hashed, "secret");
        assert!(hasher.verify("secret", &hashed));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hasher = hasher();
        let hashed = hasher.hash("secret").unwrap();

        assert!(!hasher.verify("Secret", &hashed));
        assert!(!hasher.verify("", &hashed));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = hasher();
        let first = hasher.hash("secret").unwrap();
        let second = hasher.hash("secret").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("secret", &first));
        assert!(hasher.verify("secret", &second));
    }

    #[test]
    fn test_malformed_hash_is_false_not_error() {
        let hasher = hasher();

        assert!(!hasher.verify("secret", "not-a-bcrypt-hash"));
        assert!(!hasher.verify("secret", ""));
        assert!(!hasher.verify("secret", "$2b$04$tooshort"));
    }

    #[test]
    fn test_cost_bounds() {
        assert!(PasswordHasher::new(MIN_COST - 1).is_err());
        assert!(PasswordHasher::new(MAX_COST + 1).is_err());
        assert_eq!(PasswordHasher::default().cost(), DEFAULT_COST);
    }
}
