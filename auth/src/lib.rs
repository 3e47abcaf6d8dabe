//! Credential and token primitives for the acquisitions services.
//!
//! - Password hashing (Argon2id, PHC strings)
//! - Identity tokens (HS256 JWT with a fixed lifetime)
//!
//! Services own their domain rules; this crate only knows how to hash a
//! password and how to sign or verify a [`TokenClaims`] payload.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("secret1").unwrap();
//! assert!(hasher.verify("secret1", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenClaims, TokenIssuer};
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = TokenClaims::new("1", "a@b.com", "user");
//! let token = issuer.sign(&claims).unwrap();
//! assert_eq!(issuer.verify(&token).unwrap(), claims);
//! ```

pub mod jwt;
pub mod password;

pub use jwt::TokenClaims;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use password::PasswordError;
pub use password::PasswordHasher;
