use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an issued bearer token.
///
/// `sub`, `iat`, and `exp` are always present in tokens this service
/// issues; caller-supplied extra claims are flattened into the payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (principal identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Additional custom fields (flattened into the payload)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create claims with the required registered fields.
    ///
    /// # Arguments
    /// * `subject` - Principal identifier stored in `sub`
    /// * `issued_at` - Issue instant as Unix timestamp
    /// * `expires_at` - Expiry instant as Unix timestamp
    pub fn new(subject: impl ToString, issued_at: i64, expires_at: i64) -> Self {
        Self {
            sub: subject.to_string(),
            iat: issued_at,
            exp: expires_at,
            extra: HashMap::new(),
        }
    }

    /// Add a custom claim.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Check whether the token is no longer valid at the given instant.
    ///
    /// A token is live only while `exp` is strictly in the future.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = Claims::new("user@example.com", 1000, 1900);
        assert_eq!(claims.sub, "user@example.com");
        assert_eq!(claims.iat, 1000);
        assert_eq!(claims.exp, 1900);
        assert!(claims.extra.is_empty());
    }

    #[test]
    fn test_with_extra() {
        let claims = Claims::new("user@example.com", 1000, 1900).with_extra("role", "ADMIN");

        assert_eq!(claims.extra.get("role").unwrap().as_str(), Some("ADMIN"));
    }

    #[test]
    fn test_extra_claims_flatten_into_payload() {
        let claims = Claims::new("user@example.com", 1000, 1900).with_extra("role", "ADMIN");

        let payload = serde_json::to_value(&claims).expect("Failed to serialize claims");
        assert_eq!(payload["sub"], "user@example.com");
        assert_eq!(payload["role"], "ADMIN");
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::new("user@example.com", 900, 1000);

        assert!(!claims.is_expired(999));
        // Validity requires exp strictly in the future
        assert!(claims.is_expired(1000));
        assert!(claims.is_expired(1001));
    }
}
