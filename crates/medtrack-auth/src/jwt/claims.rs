//! JWT claims structure used in access tokens.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Claims payload embedded in every access token.
///
/// The subject is the user's email; refresh tokens are opaque database
/// records, not JWTs, so no token-type discriminator is needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user's email.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Caller-supplied extra claims.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Claims {
    /// Check whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_check() {
        let now = Utc::now().timestamp();
        let live = Claims {
            sub: "a@x.com".to_string(),
            iat: now,
            exp: now + 3600,
            extra: serde_json::Map::new(),
        };
        assert!(!live.is_expired());

        let stale = Claims { exp: now - 1, ..live };
        assert!(stale.is_expired());
    }
}
