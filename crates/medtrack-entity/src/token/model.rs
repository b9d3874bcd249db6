//! Refresh-token entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted refresh-token record.
///
/// The token value is an opaque capability-style secret, not a signed JWT.
/// A record is *valid* iff it is neither expired nor revoked; revocation
/// is monotonic — once revoked, a record never becomes valid again.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshToken {
    /// Unique record identifier.
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
    /// Opaque random token string (unique).
    pub token: String,
    /// Expiry timestamp.
    pub expires_at: DateTime<Utc>,
    /// Whether the token has been revoked (rotation or logout).
    pub revoked: bool,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Check whether the token has passed its expiry.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Check whether the token is valid: not expired and not revoked.
    pub fn is_valid(&self) -> bool {
        !self.is_expired() && !self.revoked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(expires_in: Duration, revoked: bool) -> RefreshToken {
        RefreshToken {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            token: Uuid::new_v4().to_string(),
            expires_at: Utc::now() + expires_in,
            revoked,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_live_token_is_valid() {
        assert!(record(Duration::days(7), false).is_valid());
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let rec = record(Duration::seconds(-1), false);
        assert!(rec.is_expired());
        assert!(!rec.is_valid());
    }

    #[test]
    fn test_revoked_token_is_invalid_even_before_expiry() {
        let rec = record(Duration::days(7), true);
        assert!(!rec.is_expired());
        assert!(!rec.is_valid());
    }

    #[test]
    fn test_expiry_and_revocation_are_independent() {
        // A record can be simultaneously expired and revoked.
        let rec = record(Duration::seconds(-1), true);
        assert!(rec.is_expired());
        assert!(rec.revoked);
        assert!(!rec.is_valid());
    }
}
