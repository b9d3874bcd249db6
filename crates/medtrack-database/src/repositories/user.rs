//! User repository implementation.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use medtrack_core::error::{AppError, ErrorKind};
use medtrack_core::result::AppResult;
use medtrack_entity::user::{CreateUser, UpdateUser, User};

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Check whether a user exists with the given email.
    pub async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check email", e))
    }

    /// Check whether another user (not `exclude`) holds the given email.
    pub async fn exists_by_email_excluding(&self, email: &str, exclude: Uuid) -> AppResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1) AND id <> $2)",
        )
        .bind(email)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check email", e))
    }

    /// Check whether a user exists with the given national ID.
    pub async fn exists_by_national_id(&self, national_id: &str) -> AppResult<bool> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE national_id = $1)")
            .bind(national_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check national id", e)
            })
    }

    /// Check whether another user (not `exclude`) holds the given national ID.
    pub async fn exists_by_national_id_excluding(
        &self,
        national_id: &str,
        exclude: Uuid,
    ) -> AppResult<bool> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE national_id = $1 AND id <> $2)")
            .bind(national_id)
            .bind(exclude)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check national id", e)
            })
    }

    /// Create a new user.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (full_name, email, national_id, birth_date, password_hash, phone) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(&data.full_name)
        .bind(&data.email)
        .bind(&data.national_id)
        .bind(data.birth_date)
        .bind(&data.password_hash)
        .bind(&data.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)
    }

    /// Create a new user inside a caller-held transaction.
    ///
    /// Used by registration so the user row and its first refresh-token
    /// record commit or roll back as one unit.
    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        data: &CreateUser,
    ) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (full_name, email, national_id, birth_date, password_hash, phone) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(&data.full_name)
        .bind(&data.email)
        .bind(&data.national_id)
        .bind(data.birth_date)
        .bind(&data.password_hash)
        .bind(&data.phone)
        .fetch_one(&mut **tx)
        .await
        .map_err(map_unique_violation)
    }

    /// Update a user's profile fields. The password hash is only replaced
    /// when one was supplied.
    pub async fn update(&self, data: &UpdateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET full_name = $2, \
                              email = $3, \
                              national_id = $4, \
                              birth_date = $5, \
                              password_hash = COALESCE($6, password_hash), \
                              phone = $7, \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(data.id)
        .bind(&data.full_name)
        .bind(&data.email)
        .bind(&data.national_id)
        .bind(data.birth_date)
        .bind(&data.password_hash)
        .bind(&data.phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_violation)?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", data.id)))
    }

    /// Delete a user by ID.
    pub async fn delete(&self, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Translate unique-constraint violations on the users table into the
/// domain's conflict errors; everything else stays a database error.
fn map_unique_violation(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
            AppError::conflict("Email already registered")
        }
        sqlx::Error::Database(ref db_err)
            if db_err.constraint() == Some("users_national_id_key") =>
        {
            AppError::conflict("National ID already registered")
        }
        _ => AppError::with_source(ErrorKind::Database, "Failed to write user", e),
    }
}
