//! Refresh-token storage operations wrapping the database repository.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use medtrack_core::config::auth::AuthConfig;
use medtrack_core::error::AppError;
use medtrack_database::repositories::refresh_token::RefreshTokenRepository;
use medtrack_entity::token::RefreshToken;

/// Durable store of refresh-token records.
///
/// Access tokens are stateless and never stored; only refresh tokens are
/// persisted, for revocation and auditability. Token values are opaque
/// capability-style secrets.
#[derive(Debug, Clone)]
pub struct TokenStore {
    /// Refresh-token database repository.
    repo: Arc<RefreshTokenRepository>,
    /// Refresh token TTL in days.
    refresh_ttl_days: i64,
}

impl TokenStore {
    /// Creates a new token store.
    pub fn new(repo: Arc<RefreshTokenRepository>, config: &AuthConfig) -> Self {
        Self {
            repo,
            refresh_ttl_days: config.refresh_ttl_days as i64,
        }
    }

    /// Creates and persists a new refresh-token record for a user.
    pub async fn create(&self, user_id: Uuid) -> Result<RefreshToken, AppError> {
        let token = Uuid::new_v4().to_string();
        let expires_at = self.expiry_from_now();
        self.repo.create(user_id, &token, expires_at).await
    }

    /// Creates a refresh-token record inside a caller-held transaction.
    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
    ) -> Result<RefreshToken, AppError> {
        let token = Uuid::new_v4().to_string();
        let expires_at = self.expiry_from_now();
        self.repo.create_in_tx(tx, user_id, &token, expires_at).await
    }

    /// Finds a record by its opaque token value.
    pub async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, AppError> {
        self.repo.find_by_token(token).await
    }

    /// Marks a record revoked. Idempotent.
    pub async fn revoke(&self, record: &RefreshToken) -> Result<(), AppError> {
        self.repo.revoke(record.id).await
    }

    /// Atomically consumes a record for rotation; returns whether this
    /// caller won the consumption race.
    pub async fn consume(&self, record: &RefreshToken) -> Result<bool, AppError> {
        self.repo.consume(record.id).await
    }

    /// Revokes every token belonging to a user. Returns the count.
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<u64, AppError> {
        self.repo.revoke_all_for_user(user_id).await
    }

    /// Deletes all records whose expiry has passed.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        self.repo.purge_expired(now).await
    }

    fn expiry_from_now(&self) -> DateTime<Utc> {
        Utc::now() + Duration::days(self.refresh_ttl_days)
    }
}
