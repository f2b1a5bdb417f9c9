//! Authentication utilities library
//!
//! Provides the credential and token building blocks used by the lists service:
//! - Password hashing (Argon2id) with a configurable cost factor
//! - A JWT codec over untyped claim maps (HS256 only)
//! - Access/refresh token pair issuance and validation with typed claims
//! - An injectable clock so token ageing can be simulated
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new(1);
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify(&hash, "my_password").is_ok());
//! assert!(hasher.verify(&hash, "not_my_password").is_err());
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//! use chrono::{Duration, Utc};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::new().with("userId", "user123");
//! let token = handler
//!     .new_signed_token(&claims, Utc::now() + Duration::minutes(5))
//!     .unwrap();
//! let decoded = handler.parse(&token).unwrap();
//! assert_eq!(decoded.get_str("userId").unwrap(), "user123");
//! assert!(!handler.is_expired(&decoded, Utc::now()));
//! ```
//!
//! ## Token Pairs
//! ```
//! use auth::{Authenticator, TokenSubject};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//! let subject = TokenSubject {
//!     user_id: "user123".to_string(),
//!     user_name: "alice".to_string(),
//!     is_admin: false,
//! };
//!
//! let tokens = auth.issue_tokens(&subject).unwrap();
//! let access = auth.validate_access_token(&tokens.access_token).unwrap();
//! assert_eq!(access.user_name, "alice");
//!
//! let refresh = auth.validate_refresh_token(&tokens.refresh_token).unwrap();
//! assert_eq!(refresh.user_id, "user123");
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AccessClaims;
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::RefreshClaims;
pub use authenticator::TokenLifetimes;
pub use authenticator::TokenPair;
pub use authenticator::TokenSubject;
pub use authenticator::TokenType;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
