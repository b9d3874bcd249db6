//! JWT token validation and subject extraction.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use medtrack_core::config::auth::AuthConfig;
use medtrack_core::error::AppError;

use super::claims::Claims;

/// Validates JWT access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token string.
    ///
    /// Signature validity and expiry are independent failure modes; each
    /// maps to its own error message.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::authentication("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::authentication("Invalid token signature")
                    }
                    _ => AppError::authentication(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Extracts the subject email from a token, failing on a bad
    /// signature, malformed token, or passed expiry.
    pub fn extract_subject(&self, token: &str) -> Result<String, AppError> {
        self.decode(token).map(|claims| claims.sub)
    }

    /// Checks a token against an expected subject.
    ///
    /// Returns `false` when the signature is invalid, the expiry has
    /// passed, or the encoded subject differs from `expected_subject`.
    pub fn verify(&self, token: &str, expected_subject: &str) -> bool {
        match self.decode(token) {
            Ok(claims) => claims.sub == expected_subject,
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let cfg = config("test-secret");
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);

        let token = encoder.issue_access_token("a@x.com").unwrap();
        assert!(decoder.verify(&token, "a@x.com"));
        assert_eq!(decoder.extract_subject(&token).unwrap(), "a@x.com");
    }

    #[test]
    fn test_subject_mismatch_fails_verification() {
        let cfg = config("test-secret");
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);

        let token = encoder.issue_access_token("a@x.com").unwrap();
        assert!(!decoder.verify(&token, "b@x.com"));
    }

    #[test]
    fn test_wrong_key_fails_verification() {
        let encoder = JwtEncoder::new(&config("key-one"));
        let decoder = JwtDecoder::new(&config("key-two"));

        let token = encoder.issue_access_token("a@x.com").unwrap();
        assert!(!decoder.verify(&token, "a@x.com"));
        assert!(decoder.extract_subject(&token).is_err());
    }

    #[test]
    fn test_expired_token_fails_even_with_valid_signature() {
        let cfg = config("test-secret");
        let decoder = JwtDecoder::new(&cfg);

        // Hand-craft a token whose expiry is well in the past.
        let now = chrono::Utc::now().timestamp();
        let claims = crate::jwt::Claims {
            sub: "a@x.com".to_string(),
            iat: now - 7200,
            exp: now - 3600,
            extra: serde_json::Map::new(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(!decoder.verify(&token, "a@x.com"));
        let err = decoder.extract_subject(&token).unwrap_err();
        assert!(err.message.contains("expired"));
    }

    #[test]
    fn test_malformed_token_is_a_decode_error() {
        let decoder = JwtDecoder::new(&config("test-secret"));
        assert!(decoder.extract_subject("not-a-jwt").is_err());
        assert!(!decoder.verify("not-a-jwt", "a@x.com"));
    }

    #[test]
    fn test_long_lived_token_verifies() {
        let cfg = config("test-secret");
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);

        let token = encoder.issue_long_lived_token("a@x.com").unwrap();
        assert!(decoder.verify(&token, "a@x.com"));
    }
}
