//! Expired refresh-token cleanup.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use medtrack_core::error::AppError;

use super::store::TokenStore;

/// Handles periodic purging of expired refresh-token records.
///
/// Purging is a maintenance concern only — validity checks never depend
/// on it, since expired records already fail the validity predicate.
#[derive(Debug, Clone)]
pub struct TokenCleanup {
    /// Token store for purge operations.
    token_store: Arc<TokenStore>,
}

impl TokenCleanup {
    /// Creates a new cleanup handler.
    pub fn new(token_store: Arc<TokenStore>) -> Self {
        Self { token_store }
    }

    /// Runs one purge cycle, deleting all expired records.
    ///
    /// Returns the number of records deleted.
    pub async fn run_purge(&self) -> Result<u64, AppError> {
        let purged = self.token_store.purge_expired(Utc::now()).await?;

        if purged > 0 {
            info!(purged = purged, "Expired refresh tokens purged");
        }

        Ok(purged)
    }
}
