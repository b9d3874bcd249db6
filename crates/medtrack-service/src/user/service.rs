//! User profile operations.
//!
//! Unlike the other resources, the user endpoints address users by
//! explicit ID; update and delete are restricted to the caller's own
//! record and report an authorization failure on a mismatch.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use medtrack_auth::password::PasswordHasher;
use medtrack_core::error::AppError;
use medtrack_database::repositories::user::UserRepository;
use medtrack_entity::user::{UpdateUser, User};

use crate::context::RequestContext;

/// Fields accepted when updating a user profile.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UserInput {
    /// Full display name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// National identity number.
    pub national_id: Option<String>,
    /// Birth date.
    pub birth_date: Option<NaiveDate>,
    /// New raw password; the stored hash is kept when absent.
    pub password: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
}

/// Manages user profiles.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(user_repo: Arc<UserRepository>, password_hasher: Arc<PasswordHasher>) -> Self {
        Self {
            user_repo,
            password_hasher,
        }
    }

    /// Gets a user by ID.
    pub async fn get(&self, id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Gets a user by email.
    pub async fn get_by_email(&self, email: &str) -> Result<User, AppError> {
        self.user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates a user profile. Only the caller's own record may be updated.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: UserInput,
    ) -> Result<User, AppError> {
        if ctx.user_id != id {
            return Err(AppError::authorization(
                "You may only update your own profile",
            ));
        }

        let user = self.get(id).await?;

        if !user.email.eq_ignore_ascii_case(&input.email)
            && self
                .user_repo
                .exists_by_email_excluding(&input.email, id)
                .await?
        {
            return Err(AppError::conflict("Email already registered"));
        }

        if let Some(national_id) = input.national_id.as_deref() {
            if user.national_id.as_deref() != Some(national_id)
                && self
                    .user_repo
                    .exists_by_national_id_excluding(national_id, id)
                    .await?
            {
                return Err(AppError::conflict("National ID already registered"));
            }
        }

        let password_hash = match input.password.as_deref() {
            Some(password) if !password.is_empty() => {
                Some(self.password_hasher.hash_password(password)?)
            }
            _ => None,
        };

        let updated = self
            .user_repo
            .update(&UpdateUser {
                id,
                full_name: input.full_name,
                email: input.email,
                national_id: input.national_id,
                birth_date: input.birth_date,
                password_hash,
                phone: input.phone,
            })
            .await?;

        info!(user_id = %id, "User profile updated");

        Ok(updated)
    }

    /// Deletes a user. Only the caller's own record may be deleted.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        if ctx.user_id != id {
            return Err(AppError::authorization(
                "You may only delete your own profile",
            ));
        }

        if !self.user_repo.delete(id).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(user_id = %id, "User deleted");
        Ok(())
    }
}
