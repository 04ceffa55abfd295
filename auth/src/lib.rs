//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for services:
//! - Password hashing (Argon2id)
//! - Signed bearer-token issuance and validation
//!
//! The library is storage-free: services wire these primitives to their own
//! credential stores and request pipelines.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use std::collections::HashMap;
//!
//! use auth::TokenService;
//! use chrono::Duration;
//!
//! // Secret is base64-encoded key material, 32+ decoded bytes for HS256.
//! let secret = "dGVzdC1zZWNyZXQta2V5LWZvci1qd3Qtc2lnbmluZy1hdC1sZWFzdC0zMi1ieXRlcw==";
//! let tokens = TokenService::new(secret.to_string(), Duration::minutes(15));
//!
//! let token = tokens.issue("user@example.com", HashMap::new()).unwrap();
//! assert_eq!(tokens.extract_subject(&token).unwrap(), "user@example.com");
//! assert!(tokens.is_valid(&token, "user@example.com"));
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use password::PasswordError;
pub use password::PasswordHasher;
