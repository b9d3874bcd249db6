//! JWT token creation with configurable signing and TTL.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};

use medtrack_core::config::auth::AuthConfig;
use medtrack_core::error::AppError;

use super::claims::Claims;

/// Creates signed JWT access tokens.
///
/// The HMAC key is loaded once from configuration and is immutable for
/// the process lifetime; there is no key rotation.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
    /// Long-lived token TTL in days.
    refresh_ttl_days: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_minutes: config.access_ttl_minutes as i64,
            refresh_ttl_days: config.refresh_ttl_days as i64,
        }
    }

    /// Generates a signed access token for the given subject email.
    pub fn issue_access_token(&self, subject_email: &str) -> Result<String, AppError> {
        self.issue_access_token_with_claims(subject_email, serde_json::Map::new())
    }

    /// Generates a signed access token carrying extra claims.
    pub fn issue_access_token_with_claims(
        &self,
        subject_email: &str,
        extra: serde_json::Map<String, serde_json::Value>,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = now + chrono::Duration::minutes(self.access_ttl_minutes);
        self.sign(subject_email, now.timestamp(), exp.timestamp(), extra)
    }

    /// Generates a signed token with the long-lived (refresh) TTL.
    pub fn issue_long_lived_token(&self, subject_email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = now + chrono::Duration::days(self.refresh_ttl_days);
        self.sign(
            subject_email,
            now.timestamp(),
            exp.timestamp(),
            serde_json::Map::new(),
        )
    }

    fn sign(
        &self,
        subject_email: &str,
        iat: i64,
        exp: i64,
        extra: serde_json::Map<String, serde_json::Value>,
    ) -> Result<String, AppError> {
        let claims = Claims {
            sub: subject_email.to_string(),
            iat,
            exp,
            extra,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))
    }
}
