//! Prescription repository implementation.
//!
//! Items are managed with explicit statements inside one transaction per
//! write: creation inserts the parent then its items, update rewrites the
//! item set wholesale, deletion removes children before the parent.

use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use medtrack_core::error::{AppError, ErrorKind};
use medtrack_core::result::AppResult;
use medtrack_core::types::pagination::{PageRequest, PageResponse};
use medtrack_entity::prescription::{
    CreatePrescription, CreatePrescriptionItem, Prescription, PrescriptionItem, UpdatePrescription,
};

/// Repository for prescriptions and their items.
#[derive(Debug, Clone)]
pub struct PrescriptionRepository {
    pool: PgPool,
}

impl PrescriptionRepository {
    /// Create a new prescription repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a prescription by ID, scoped to its owner.
    pub async fn find_by_id_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Prescription>> {
        sqlx::query_as::<_, Prescription>(
            "SELECT * FROM prescriptions WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find prescription", e))
    }

    /// Load the items of a prescription.
    pub async fn find_items(&self, prescription_id: Uuid) -> AppResult<Vec<PrescriptionItem>> {
        sqlx::query_as::<_, PrescriptionItem>(
            "SELECT * FROM prescription_items WHERE prescription_id = $1 ORDER BY created_at ASC",
        )
        .bind(prescription_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load prescription items", e)
        })
    }

    /// List a user's prescriptions with pagination.
    pub async fn find_all_for_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Prescription>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM prescriptions WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count prescriptions", e)
                })?;

        let prescriptions = sqlx::query_as::<_, Prescription>(
            "SELECT * FROM prescriptions WHERE user_id = $1 \
             ORDER BY issued_on DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list prescriptions", e)
        })?;

        Ok(PageResponse::new(
            prescriptions,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List a user's prescriptions that are still current on `today`.
    pub async fn find_current_for_user(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> AppResult<Vec<Prescription>> {
        sqlx::query_as::<_, Prescription>(
            "SELECT * FROM prescriptions WHERE user_id = $1 \
             AND (expires_on IS NULL OR expires_on >= $2) \
             ORDER BY issued_on DESC",
        )
        .bind(user_id)
        .bind(today)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list current prescriptions", e)
        })
    }

    /// Search a user's prescriptions by doctor name (case-insensitive).
    pub async fn search_by_doctor_for_user(
        &self,
        user_id: Uuid,
        doctor_name: &str,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Prescription>> {
        let pattern = format!("%{doctor_name}%");

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM prescriptions WHERE user_id = $1 AND doctor_name ILIKE $2",
        )
        .bind(user_id)
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count search results", e)
        })?;

        let prescriptions = sqlx::query_as::<_, Prescription>(
            "SELECT * FROM prescriptions WHERE user_id = $1 AND doctor_name ILIKE $2 \
             ORDER BY issued_on DESC LIMIT $3 OFFSET $4",
        )
        .bind(user_id)
        .bind(&pattern)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to search prescriptions", e)
        })?;

        Ok(PageResponse::new(
            prescriptions,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a prescription with its items in one transaction.
    pub async fn create(
        &self,
        data: &CreatePrescription,
    ) -> AppResult<(Prescription, Vec<PrescriptionItem>)> {
        let mut tx = self.begin().await?;

        let prescription = sqlx::query_as::<_, Prescription>(
            "INSERT INTO prescriptions \
                 (user_id, doctor_name, doctor_registration, issued_on, expires_on, notes, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.doctor_name)
        .bind(&data.doctor_registration)
        .bind(data.issued_on)
        .bind(data.expires_on)
        .bind(&data.notes)
        .bind(&data.image_url)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create prescription", e)
        })?;

        let items = Self::insert_items(&mut tx, prescription.id, &data.items).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit prescription", e)
        })?;

        Ok((prescription, items))
    }

    /// Update a prescription and replace its item set in one transaction.
    ///
    /// Returns `None` when the prescription does not exist for this owner.
    pub async fn update(
        &self,
        user_id: Uuid,
        data: &UpdatePrescription,
    ) -> AppResult<Option<(Prescription, Vec<PrescriptionItem>)>> {
        let mut tx = self.begin().await?;

        let prescription = sqlx::query_as::<_, Prescription>(
            "UPDATE prescriptions SET doctor_name = $3, \
                                      doctor_registration = $4, \
                                      issued_on = $5, \
                                      expires_on = $6, \
                                      notes = $7, \
                                      image_url = $8 \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(data.id)
        .bind(user_id)
        .bind(&data.doctor_name)
        .bind(&data.doctor_registration)
        .bind(data.issued_on)
        .bind(data.expires_on)
        .bind(&data.notes)
        .bind(&data.image_url)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update prescription", e)
        })?;

        let Some(prescription) = prescription else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM prescription_items WHERE prescription_id = $1")
            .bind(prescription.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear prescription items", e)
            })?;

        let items = Self::insert_items(&mut tx, prescription.id, &data.items).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit prescription", e)
        })?;

        Ok(Some((prescription, items)))
    }

    /// Delete a prescription and its items, scoped to its owner.
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let mut tx = self.begin().await?;

        sqlx::query(
            "DELETE FROM prescription_items WHERE prescription_id = \
                 (SELECT id FROM prescriptions WHERE id = $1 AND user_id = $2)",
        )
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete prescription items", e)
        })?;

        let result = sqlx::query("DELETE FROM prescriptions WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete prescription", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit prescription delete", e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn begin(&self) -> AppResult<Transaction<'_, Postgres>> {
        self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })
    }

    async fn insert_items(
        tx: &mut Transaction<'_, Postgres>,
        prescription_id: Uuid,
        items: &[CreatePrescriptionItem],
    ) -> AppResult<Vec<PrescriptionItem>> {
        let mut created = Vec::with_capacity(items.len());

        for item in items {
            let row = sqlx::query_as::<_, PrescriptionItem>(
                "INSERT INTO prescription_items \
                     (prescription_id, medication_id, description, instructions, quantity) \
                 VALUES ($1, $2, $3, $4, $5) \
                 RETURNING *",
            )
            .bind(prescription_id)
            .bind(item.medication_id)
            .bind(&item.description)
            .bind(&item.instructions)
            .bind(item.quantity)
            .fetch_one(&mut **tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to create prescription item", e)
            })?;

            created.push(row);
        }

        Ok(created)
    }
}
