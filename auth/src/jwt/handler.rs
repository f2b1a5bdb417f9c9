use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Token codec: signs and parses bearer tokens carrying [`Claims`].
///
/// Uses HS256 (HMAC with SHA-256) and nothing else. Tokens whose header names
/// any other algorithm are rejected before the signature is looked at.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign `claims` with `expiry` stamped into the `exp` claim.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn new_signed_token(
        &self,
        claims: &Claims,
        expiry: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = claims.clone().with_expiration(expiry.timestamp());
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token's algorithm and signature and return its claims.
    ///
    /// Expiry is not checked here; see [`JwtHandler::is_expired`].
    ///
    /// # Errors
    /// * `InvalidAlgorithm` - Header names an algorithm other than HS256
    /// * `InvalidSignature` - Signature does not match the secret
    /// * `DecodingFailed` - Structure or encoding is invalid
    pub fn parse(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidAlgorithm => JwtError::InvalidAlgorithm,
                    ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                    _ => JwtError::DecodingFailed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Compare the embedded expiry with `now`.
    pub fn is_expired(&self, claims: &Claims, now: DateTime<Utc>) -> bool {
        claims.is_expired(now.timestamp())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn sample_claims() -> Claims {
        Claims::new()
            .with("userId", "user123")
            .with("userName", "alice")
            .with("isAdmin", false)
    }

    #[test]
    fn test_sign_and_parse() {
        let handler = JwtHandler::new(SECRET);
        let expiry = Utc::now() + Duration::minutes(15);

        let token = handler
            .new_signed_token(&sample_claims(), expiry)
            .expect("Failed to sign token");
        assert!(!token.is_empty());

        let parsed = handler.parse(&token).expect("Failed to parse token");
        assert_eq!(parsed.exp, Some(expiry.timestamp()));
        assert_eq!(parsed.get_str("userName"), Ok("alice"));
        assert_eq!(parsed.values, sample_claims().values);
        assert!(!handler.is_expired(&parsed, Utc::now()));
    }

    #[test]
    fn test_parse_does_not_reject_expired_tokens() {
        let handler = JwtHandler::new(SECRET);
        let now = Utc::now();

        let token = handler
            .new_signed_token(&sample_claims(), now - Duration::seconds(1))
            .unwrap();

        let parsed = handler.parse(&token).expect("Expired token should parse");
        assert!(handler.is_expired(&parsed, now));
    }

    #[test]
    fn test_parse_invalid_token() {
        let handler = JwtHandler::new(SECRET);

        let result = handler.parse("invalid.token.here");
        assert!(matches!(result, Err(JwtError::DecodingFailed(_))));
    }

    #[test]
    fn test_parse_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = handler1
            .new_signed_token(&sample_claims(), Utc::now() + Duration::hours(1))
            .unwrap();

        assert_eq!(handler2.parse(&token), Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_parse_rejects_other_algorithms() {
        let handler = JwtHandler::new(SECRET);
        let claims = sample_claims().with_expiration((Utc::now() + Duration::hours(1)).timestamp());

        // Same secret, different HMAC variant
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(handler.parse(&token), Err(JwtError::InvalidAlgorithm));
    }

    #[test]
    fn test_parse_rejects_tampered_payload() {
        let handler = JwtHandler::new(SECRET);
        let token = handler
            .new_signed_token(&sample_claims(), Utc::now() + Duration::hours(1))
            .unwrap();

        let other = handler
            .new_signed_token(
                &sample_claims().with("isAdmin", true),
                Utc::now() + Duration::hours(1),
            )
            .unwrap();

        // Header and payload of one token with the signature of another
        let mut parts: Vec<&str> = other.split('.').collect();
        let signature = token.split('.').nth(2).unwrap();
        parts[2] = signature;
        let forged = parts.join(".");

        assert_eq!(handler.parse(&forged), Err(JwtError::InvalidSignature));
    }
}
