//! Medication repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use medtrack_core::error::{AppError, ErrorKind};
use medtrack_core::result::AppResult;
use medtrack_core::types::pagination::{PageRequest, PageResponse};
use medtrack_entity::medication::{CreateMedication, Medication, UpdateMedication};

/// Repository for medication CRUD and query operations.
///
/// Every lookup is scoped to the owning user; a row owned by someone else
/// is indistinguishable from a missing row.
#[derive(Debug, Clone)]
pub struct MedicationRepository {
    pool: PgPool,
}

impl MedicationRepository {
    /// Create a new medication repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a medication by ID, scoped to its owner.
    pub async fn find_by_id_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Medication>> {
        sqlx::query_as::<_, Medication>(
            "SELECT * FROM medications WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find medication", e))
    }

    /// List a user's medications with pagination.
    pub async fn find_all_for_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Medication>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM medications WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count medications", e)
            })?;

        let medications = sqlx::query_as::<_, Medication>(
            "SELECT * FROM medications WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list medications", e))?;

        Ok(PageResponse::new(
            medications,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Search a user's medications by full or short name (case-insensitive).
    pub async fn search_for_user(
        &self,
        user_id: Uuid,
        name: &str,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Medication>> {
        let pattern = format!("%{name}%");

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM medications WHERE user_id = $1 \
             AND (full_name ILIKE $2 OR short_name ILIKE $2)",
        )
        .bind(user_id)
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count search results", e)
        })?;

        let medications = sqlx::query_as::<_, Medication>(
            "SELECT * FROM medications WHERE user_id = $1 \
             AND (full_name ILIKE $2 OR short_name ILIKE $2) \
             ORDER BY full_name ASC LIMIT $3 OFFSET $4",
        )
        .bind(user_id)
        .bind(&pattern)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to search medications", e)
        })?;

        Ok(PageResponse::new(
            medications,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new medication.
    pub async fn create(&self, data: &CreateMedication) -> AppResult<Medication> {
        sqlx::query_as::<_, Medication>(
            "INSERT INTO medications (user_id, full_name, short_name, dosage, form, photo_url) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.full_name)
        .bind(&data.short_name)
        .bind(&data.dosage)
        .bind(&data.form)
        .bind(&data.photo_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create medication", e))
    }

    /// Update a medication, scoped to its owner.
    pub async fn update(&self, user_id: Uuid, data: &UpdateMedication) -> AppResult<Option<Medication>> {
        sqlx::query_as::<_, Medication>(
            "UPDATE medications SET full_name = $3, \
                                    short_name = $4, \
                                    dosage = $5, \
                                    form = $6, \
                                    photo_url = $7, \
                                    updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(data.id)
        .bind(user_id)
        .bind(&data.full_name)
        .bind(&data.short_name)
        .bind(&data.dosage)
        .bind(&data.form)
        .bind(&data.photo_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update medication", e))
    }

    /// Delete a medication, scoped to its owner.
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM medications WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete medication", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
