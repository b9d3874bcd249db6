//! Auth lifecycle manager — register, login, refresh-token rotation, logout.

use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use medtrack_core::error::{AppError, ErrorKind};
use medtrack_database::repositories::user::UserRepository;
use medtrack_entity::user::{CreateUser, User};

use crate::jwt::JwtEncoder;
use crate::password::PasswordHasher;

use super::store::TokenStore;

/// Tokens plus identity fields returned by register, login, and refresh.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AuthTokens {
    /// Signed access token (stateless, short-lived).
    pub access_token: String,
    /// Opaque refresh token (persisted, revocable).
    pub refresh_token: String,
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The authenticated user's email.
    pub email: String,
    /// The authenticated user's display name.
    pub full_name: String,
}

/// Validated registration data.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Full display name.
    pub full_name: String,
    /// Email address — the login key.
    pub email: String,
    /// National identity number (optional).
    pub national_id: Option<String>,
    /// Birth date (optional).
    pub birth_date: Option<NaiveDate>,
    /// Raw password, hashed before any persistence.
    pub password: String,
    /// Phone number (optional).
    pub phone: Option<String>,
}

/// Orchestrates credential verification, token issuance, refresh-token
/// rotation, and logout.
#[derive(Clone)]
pub struct AuthManager {
    /// JWT encoder for access tokens.
    jwt_encoder: Arc<JwtEncoder>,
    /// Refresh-token persistence.
    token_store: Arc<TokenStore>,
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
    /// Pool for multi-repository transactions.
    pool: PgPool,
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager").finish()
    }
}

impl AuthManager {
    /// Creates a new auth manager with all required dependencies.
    pub fn new(
        jwt_encoder: Arc<JwtEncoder>,
        token_store: Arc<TokenStore>,
        user_repo: Arc<UserRepository>,
        password_hasher: Arc<PasswordHasher>,
        pool: PgPool,
    ) -> Self {
        Self {
            jwt_encoder,
            token_store,
            user_repo,
            password_hasher,
            pool,
        }
    }

    /// Registers a new user and opens their first session.
    ///
    /// 1. Reject a duplicate email
    /// 2. Reject a duplicate national ID (when provided)
    /// 3. Hash the password
    /// 4. Persist the user and their first refresh-token record in one
    ///    transaction
    /// 5. Issue the access token
    pub async fn register(&self, reg: Registration) -> Result<AuthTokens, AppError> {
        if self.user_repo.exists_by_email(&reg.email).await? {
            return Err(AppError::conflict("Email already registered"));
        }

        if let Some(national_id) = reg.national_id.as_deref() {
            if self.user_repo.exists_by_national_id(national_id).await? {
                return Err(AppError::conflict("National ID already registered"));
            }
        }

        let password_hash = self.password_hasher.hash_password(&reg.password)?;

        let create = CreateUser {
            full_name: reg.full_name,
            email: reg.email,
            national_id: reg.national_id,
            birth_date: reg.birth_date,
            password_hash,
            phone: reg.phone,
        };

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let user = self.user_repo.create_in_tx(&mut tx, &create).await?;
        let refresh = self.token_store.create_in_tx(&mut tx, user.id).await?;

        let access_token = self.jwt_encoder.issue_access_token(&user.email)?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit registration", e)
        })?;

        info!(user_id = %user.id, "User registered");

        Ok(Self::tokens(access_token, refresh.token, &user))
    }

    /// Authenticates a user by email and password.
    ///
    /// An unknown email and a wrong password produce the same error: the
    /// response never reveals which of the two was at fault.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthTokens, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(bad_credentials)?;

        let password_valid = self
            .password_hasher
            .verify_password(password, &user.password_hash)?;

        if !password_valid {
            return Err(bad_credentials());
        }

        let access_token = self.jwt_encoder.issue_access_token(&user.email)?;
        let refresh = self.token_store.create(user.id).await?;

        info!(user_id = %user.id, "Login successful");

        Ok(Self::tokens(access_token, refresh.token, &user))
    }

    /// Rotates a refresh token.
    ///
    /// The presented record is consumed with a database compare-and-swap
    /// before a successor is minted: of two concurrent requests carrying
    /// the same token, at most one can produce a live successor.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens, AppError> {
        let record = self
            .token_store
            .find_by_token(refresh_token)
            .await?
            .ok_or_else(|| AppError::session("Invalid refresh token"))?;

        if !record.is_valid() {
            return Err(AppError::session("Refresh token expired or revoked"));
        }

        if !self.token_store.consume(&record).await? {
            // Lost a concurrent rotation race; the token is spent.
            return Err(AppError::session("Refresh token expired or revoked"));
        }

        let user = self
            .user_repo
            .find_by_id(record.user_id)
            .await?
            .ok_or_else(|| AppError::session("Invalid refresh token"))?;

        let access_token = self.jwt_encoder.issue_access_token(&user.email)?;
        let new_refresh = self.token_store.create(user.id).await?;

        info!(user_id = %user.id, "Refresh token rotated");

        Ok(Self::tokens(access_token, new_refresh.token, &user))
    }

    /// Revokes every refresh token belonging to a user.
    ///
    /// Unconditionally succeeds; a user with no tokens revokes zero.
    pub async fn logout(&self, user_id: Uuid) -> Result<(), AppError> {
        let revoked = self.token_store.revoke_all_for_user(user_id).await?;
        info!(user_id = %user_id, revoked = revoked, "Logout completed");
        Ok(())
    }

    fn tokens(access_token: String, refresh_token: String, user: &User) -> AuthTokens {
        AuthTokens {
            access_token,
            refresh_token,
            user_id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
        }
    }
}

fn bad_credentials() -> AppError {
    AppError::authentication("Invalid email or password")
}
