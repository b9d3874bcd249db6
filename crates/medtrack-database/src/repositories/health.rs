//! Health-record repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use medtrack_core::error::{AppError, ErrorKind};
use medtrack_core::result::AppResult;
use medtrack_core::types::pagination::{PageRequest, PageResponse};
use medtrack_entity::health::{CreateHealthRecord, HealthRecord, MetricKind, UpdateHealthRecord};

/// Repository for health-monitoring records.
#[derive(Debug, Clone)]
pub struct HealthRecordRepository {
    pool: PgPool,
}

impl HealthRecordRepository {
    /// Create a new health-record repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a record by ID, scoped to its owner.
    pub async fn find_by_id_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<HealthRecord>> {
        sqlx::query_as::<_, HealthRecord>(
            "SELECT * FROM health_records WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find health record", e))
    }

    /// List a user's records with pagination, newest measurement first.
    pub async fn find_all_for_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<HealthRecord>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM health_records WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count health records", e)
                })?;

        let records = sqlx::query_as::<_, HealthRecord>(
            "SELECT * FROM health_records WHERE user_id = $1 \
             ORDER BY recorded_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list health records", e)
        })?;

        Ok(PageResponse::new(
            records,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List a user's records of one kind with pagination.
    pub async fn find_by_kind_for_user(
        &self,
        user_id: Uuid,
        kind: MetricKind,
        page: &PageRequest,
    ) -> AppResult<PageResponse<HealthRecord>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM health_records WHERE user_id = $1 AND kind = $2",
        )
        .bind(user_id)
        .bind(kind)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count health records", e)
        })?;

        let records = sqlx::query_as::<_, HealthRecord>(
            "SELECT * FROM health_records WHERE user_id = $1 AND kind = $2 \
             ORDER BY recorded_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(user_id)
        .bind(kind)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list health records", e)
        })?;

        Ok(PageResponse::new(
            records,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List a user's most recent measurements.
    pub async fn find_latest_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<HealthRecord>> {
        sqlx::query_as::<_, HealthRecord>(
            "SELECT * FROM health_records WHERE user_id = $1 \
             ORDER BY recorded_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list latest records", e)
        })
    }

    /// List a user's records measured inside a time window, paginated.
    pub async fn find_between_for_user(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<HealthRecord>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM health_records \
             WHERE user_id = $1 AND recorded_at BETWEEN $2 AND $3",
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count health records", e)
        })?;

        let records = sqlx::query_as::<_, HealthRecord>(
            "SELECT * FROM health_records \
             WHERE user_id = $1 AND recorded_at BETWEEN $2 AND $3 \
             ORDER BY recorded_at DESC LIMIT $4 OFFSET $5",
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list health records", e)
        })?;

        Ok(PageResponse::new(
            records,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new health record.
    pub async fn create(&self, data: &CreateHealthRecord) -> AppResult<HealthRecord> {
        sqlx::query_as::<_, HealthRecord>(
            "INSERT INTO health_records \
                 (user_id, kind, systolic, diastolic, pulse, glucose_level, fasting, notes, recorded_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.kind)
        .bind(data.systolic)
        .bind(data.diastolic)
        .bind(data.pulse)
        .bind(data.glucose_level)
        .bind(data.fasting)
        .bind(&data.notes)
        .bind(data.recorded_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create health record", e)
        })
    }

    /// Update a health record, scoped to its owner.
    pub async fn update(
        &self,
        user_id: Uuid,
        data: &UpdateHealthRecord,
    ) -> AppResult<Option<HealthRecord>> {
        sqlx::query_as::<_, HealthRecord>(
            "UPDATE health_records SET kind = $3, \
                                       systolic = $4, \
                                       diastolic = $5, \
                                       pulse = $6, \
                                       glucose_level = $7, \
                                       fasting = $8, \
                                       notes = $9, \
                                       recorded_at = $10 \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(data.id)
        .bind(user_id)
        .bind(data.kind)
        .bind(data.systolic)
        .bind(data.diastolic)
        .bind(data.pulse)
        .bind(data.glucose_level)
        .bind(data.fasting)
        .bind(&data.notes)
        .bind(data.recorded_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update health record", e)
        })
    }

    /// Delete a health record, scoped to its owner.
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM health_records WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete health record", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
