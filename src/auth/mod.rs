//! Authentication Module
//! Mission: Password hashing, bearer tokens and current-user resolution

pub mod api;
pub mod clock;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use jwt::JwtHandler;
pub use middleware::require_user;
pub use models::{AuthError, Claims, TokenPair};
pub use password::PasswordHasher;
pub use service::{AuthService, UserLookup};
