//! Reminder repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use medtrack_core::error::{AppError, ErrorKind};
use medtrack_core::result::AppResult;
use medtrack_core::types::pagination::{PageRequest, PageResponse};
use medtrack_entity::reminder::{CreateReminder, Reminder, UpdateReminder};

/// Repository for dosage reminders.
#[derive(Debug, Clone)]
pub struct ReminderRepository {
    pool: PgPool,
}

impl ReminderRepository {
    /// Create a new reminder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a reminder by ID, scoped to its owner.
    pub async fn find_by_id_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Reminder>> {
        sqlx::query_as::<_, Reminder>("SELECT * FROM reminders WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find reminder", e))
    }

    /// List a user's reminders with pagination.
    pub async fn find_all_for_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reminder>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reminders WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count reminders", e)
            })?;

        let reminders = sqlx::query_as::<_, Reminder>(
            "SELECT * FROM reminders WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list reminders", e))?;

        Ok(PageResponse::new(
            reminders,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List a user's active reminders.
    pub async fn find_active_for_user(&self, user_id: Uuid) -> AppResult<Vec<Reminder>> {
        sqlx::query_as::<_, Reminder>(
            "SELECT * FROM reminders WHERE user_id = $1 AND active \
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list active reminders", e)
        })
    }

    /// Create a new reminder.
    pub async fn create(&self, data: &CreateReminder) -> AppResult<Reminder> {
        sqlx::query_as::<_, Reminder>(
            "INSERT INTO reminders \
                 (user_id, medication_id, times, weekdays, dose_quantity, instructions, active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.medication_id)
        .bind(&data.times)
        .bind(&data.weekdays)
        .bind(data.dose_quantity)
        .bind(&data.instructions)
        .bind(data.active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create reminder", e))
    }

    /// Update a reminder, scoped to its owner.
    pub async fn update(&self, user_id: Uuid, data: &UpdateReminder) -> AppResult<Option<Reminder>> {
        sqlx::query_as::<_, Reminder>(
            "UPDATE reminders SET medication_id = $3, \
                                  times = $4, \
                                  weekdays = $5, \
                                  dose_quantity = $6, \
                                  instructions = $7, \
                                  active = $8 \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(data.id)
        .bind(user_id)
        .bind(data.medication_id)
        .bind(&data.times)
        .bind(&data.weekdays)
        .bind(data.dose_quantity)
        .bind(&data.instructions)
        .bind(data.active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update reminder", e))
    }

    /// Delete a reminder, scoped to its owner.
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM reminders WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete reminder", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
