use std::collections::HashMap;
use std::sync::OnceLock;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Issues and verifies compact signed bearer tokens.
///
/// Holds one long-lived symmetric key pair, derived from a base64-encoded
/// secret on first use and cached for the lifetime of the service. Tokens
/// are standard three-part `header.payload.signature` JWS strings signed
/// with HS256; the server keeps no per-token state.
pub struct TokenService {
    secret: String,
    ttl: Duration,
    algorithm: Algorithm,
    keys: OnceLock<SigningKeys>,
}

impl TokenService {
    /// Create a new token service.
    ///
    /// # Arguments
    /// * `secret` - Base64-encoded signing secret; must decode to at least
    ///   256 bits of key material for HS256
    /// * `ttl` - Lifetime granted to every issued token
    ///
    /// # Security Notes
    /// - Store the secret in environment variables or secure vaults, never
    ///   in code
    /// - Rotate secrets periodically
    pub fn new(secret: String, ttl: Duration) -> Self {
        Self {
            secret,
            ttl,
            algorithm: Algorithm::HS256,
            keys: OnceLock::new(),
        }
    }

    /// Issue a signed token for the given subject.
    ///
    /// Claims are `sub = subject`, `iat = now`, `exp = now + ttl`, plus the
    /// caller-supplied extra claims (pass an empty map for none).
    ///
    /// # Arguments
    /// * `subject` - Principal identifier stored in `sub`
    /// * `extra_claims` - Additional claims merged into the payload
    ///
    /// # Returns
    /// Compact JWS string
    ///
    /// # Errors
    /// * `InvalidKey` - Secret is not valid base64
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        subject: &str,
        extra_claims: HashMap<String, serde_json::Value>,
    ) -> Result<String, TokenError> {
        let issued_at = Utc::now();
        let expires_at = issued_at + self.ttl;

        let mut claims = Claims::new(subject, issued_at.timestamp(), expires_at.timestamp());
        claims.extra = extra_claims;

        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.signing_keys()?.encoding)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Parse and signature-verify a token, returning its subject.
    ///
    /// Expiry is deliberately not checked here: callers can look up the
    /// candidate principal by subject before deciding validity with
    /// [`is_valid`](Self::is_valid).
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed structure or signature mismatch
    /// * `InvalidKey` - Secret is not valid base64
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        self.decode(token).map(|claims| claims.sub)
    }

    /// Parse and signature-verify a token, returning all claims.
    ///
    /// Same contract as [`extract_subject`](Self::extract_subject); the
    /// seam for claim-based checks that need more than `sub`.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed structure or signature mismatch
    /// * `InvalidKey` - Secret is not valid base64
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is a validity concern handled by `validate`; extraction
        // must keep working on expired tokens.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &self.signing_keys()?.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::InvalidToken(e.to_string()))
    }

    /// Check a token against an expected subject.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed, mis-signed, or subject mismatch
    /// * `Expired` - Structurally valid but `exp` is not in the future
    pub fn validate(&self, token: &str, expected_subject: &str) -> Result<(), TokenError> {
        let claims = self.decode(token)?;

        if claims.sub != expected_subject {
            return Err(TokenError::InvalidToken(
                "subject does not match".to_string(),
            ));
        }
        if claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(())
    }

    /// True iff the token parses, signature-verifies, carries the expected
    /// subject, and `exp` is strictly in the future.
    ///
    /// Any parse or signature failure is fail-closed: the answer is false,
    /// never a silently-accepted token.
    pub fn is_valid(&self, token: &str, expected_subject: &str) -> bool {
        self.validate(token, expected_subject).is_ok()
    }

    fn signing_keys(&self) -> Result<&SigningKeys, TokenError> {
        if let Some(keys) = self.keys.get() {
            return Ok(keys);
        }

        let key_bytes = BASE64
            .decode(self.secret.as_bytes())
            .map_err(|e| TokenError::InvalidKey(format!("secret is not valid base64: {}", e)))?;
        let keys = SigningKeys {
            encoding: EncodingKey::from_secret(&key_bytes),
            decoding: DecodingKey::from_secret(&key_bytes),
        };

        // A concurrent initialization may win the race; both sides derive
        // the same deterministic value.
        Ok(self.keys.get_or_init(|| keys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // "test-secret-key-for-jwt-signing-at-least-32-bytes"
    const SECRET: &str = "dGVzdC1zZWNyZXQta2V5LWZvci1qd3Qtc2lnbmluZy1hdC1sZWFzdC0zMi1ieXRlcw==";
    // "another-test-secret-that-is-also-32-bytes-long!!"
    const OTHER_SECRET: &str = "YW5vdGhlci10ZXN0LXNlY3JldC10aGF0LWlzLWFsc28tMzItYnl0ZXMtbG9uZyEh";

    fn service(ttl: Duration) -> TokenService {
        TokenService::new(SECRET.to_string(), ttl)
    }

    #[test]
    fn test_issue_and_extract_subject() {
        let tokens = service(Duration::minutes(15));

        let token = tokens
            .issue("user@example.com", HashMap::new())
            .expect("Failed to issue token");
        assert_eq!(token.split('.').count(), 3);

        let subject = tokens
            .extract_subject(&token)
            .expect("Failed to extract subject");
        assert_eq!(subject, "user@example.com");
    }

    #[test]
    fn test_issue_sets_iat_and_exp_from_ttl() {
        let tokens = service(Duration::minutes(15));

        let token = tokens
            .issue("user@example.com", HashMap::new())
            .expect("Failed to issue token");
        let claims = tokens.decode(&token).expect("Failed to decode token");

        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_issue_merges_extra_claims() {
        let tokens = service(Duration::minutes(15));

        let mut extra = HashMap::new();
        extra.insert("role".to_string(), serde_json::json!("ADMIN"));

        let token = tokens
            .issue("user@example.com", extra)
            .expect("Failed to issue token");
        let claims = tokens.decode(&token).expect("Failed to decode token");

        assert_eq!(claims.sub, "user@example.com");
        assert_eq!(claims.extra.get("role").unwrap().as_str(), Some("ADMIN"));
    }

    #[test]
    fn test_is_valid_round_trip() {
        let tokens = service(Duration::minutes(15));

        let token = tokens
            .issue("user@example.com", HashMap::new())
            .expect("Failed to issue token");

        assert!(tokens.is_valid(&token, "user@example.com"));
    }

    #[test]
    fn test_is_valid_rejects_other_subject() {
        let tokens = service(Duration::minutes(15));

        let token = tokens
            .issue("user@example.com", HashMap::new())
            .expect("Failed to issue token");

        assert!(!tokens.is_valid(&token, "other@example.com"));
    }

    #[test]
    fn test_expired_token_is_invalid_but_still_parses() {
        // Negative TTL puts exp in the past at issue time
        let tokens = service(Duration::minutes(-15));

        let token = tokens
            .issue("user@example.com", HashMap::new())
            .expect("Failed to issue token");

        // Extraction is decoupled from validity
        assert_eq!(
            tokens.extract_subject(&token).expect("Failed to extract"),
            "user@example.com"
        );
        assert!(!tokens.is_valid(&token, "user@example.com"));
        assert!(matches!(
            tokens.validate(&token, "user@example.com"),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_tampered_signature_fails_extraction() {
        let tokens = service(Duration::minutes(15));

        let token = tokens
            .issue("user@example.com", HashMap::new())
            .expect("Failed to issue token");

        // Corrupt one character of the signature segment
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(matches!(
            tokens.extract_subject(&tampered),
            Err(TokenError::InvalidToken(_))
        ));
        assert!(!tokens.is_valid(&tampered, "user@example.com"));
    }

    #[test]
    fn test_token_from_other_key_is_rejected() {
        let tokens = service(Duration::minutes(15));
        let other = TokenService::new(OTHER_SECRET.to_string(), Duration::minutes(15));

        let token = other
            .issue("user@example.com", HashMap::new())
            .expect("Failed to issue token");

        assert!(matches!(
            tokens.extract_subject(&token),
            Err(TokenError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_malformed_token_fails_extraction() {
        let tokens = service(Duration::minutes(15));

        assert!(matches!(
            tokens.extract_subject("not.a.token"),
            Err(TokenError::InvalidToken(_))
        ));
        assert!(!tokens.is_valid("not-even-close", "user@example.com"));
    }

    #[test]
    fn test_non_base64_secret_is_rejected() {
        let tokens = TokenService::new("!!not base64!!".to_string(), Duration::minutes(15));

        assert!(matches!(
            tokens.issue("user@example.com", HashMap::new()),
            Err(TokenError::InvalidKey(_))
        ));
    }
}
