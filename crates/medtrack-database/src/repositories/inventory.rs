//! Personal inventory repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use medtrack_core::error::{AppError, ErrorKind};
use medtrack_core::result::AppResult;
use medtrack_core::types::pagination::{PageRequest, PageResponse};
use medtrack_entity::inventory::{CreateInventoryItem, InventoryItem, UpdateInventoryItem};

/// Repository for personal inventory items.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    /// Create a new inventory repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an inventory item by ID, scoped to its owner.
    pub async fn find_by_id_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<InventoryItem>> {
        sqlx::query_as::<_, InventoryItem>(
            "SELECT * FROM inventory_items WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find inventory item", e))
    }

    /// Find a user's inventory item for one medication, if any.
    pub async fn find_by_user_and_medication(
        &self,
        user_id: Uuid,
        medication_id: Uuid,
    ) -> AppResult<Option<InventoryItem>> {
        sqlx::query_as::<_, InventoryItem>(
            "SELECT * FROM inventory_items WHERE user_id = $1 AND medication_id = $2",
        )
        .bind(user_id)
        .bind(medication_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find inventory item", e))
    }

    /// List a user's inventory with pagination.
    pub async fn find_all_for_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<InventoryItem>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM inventory_items WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count inventory", e)
                })?;

        let items = sqlx::query_as::<_, InventoryItem>(
            "SELECT * FROM inventory_items WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list inventory", e))?;

        Ok(PageResponse::new(
            items,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List a user's items at or below their alert threshold.
    pub async fn find_low_stock_for_user(&self, user_id: Uuid) -> AppResult<Vec<InventoryItem>> {
        sqlx::query_as::<_, InventoryItem>(
            "SELECT * FROM inventory_items WHERE user_id = $1 \
             AND current_quantity <= alert_quantity \
             ORDER BY current_quantity ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list low-stock items", e)
        })
    }

    /// Create a new inventory item.
    pub async fn create(&self, data: &CreateInventoryItem) -> AppResult<InventoryItem> {
        sqlx::query_as::<_, InventoryItem>(
            "INSERT INTO inventory_items (user_id, medication_id, current_quantity, alert_quantity) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.medication_id)
        .bind(data.current_quantity)
        .bind(data.alert_quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create inventory item", e)
        })
    }

    /// Update an inventory item, scoped to its owner.
    pub async fn update(
        &self,
        user_id: Uuid,
        data: &UpdateInventoryItem,
    ) -> AppResult<Option<InventoryItem>> {
        sqlx::query_as::<_, InventoryItem>(
            "UPDATE inventory_items SET medication_id = $3, \
                                        current_quantity = $4, \
                                        alert_quantity = $5, \
                                        updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(data.id)
        .bind(user_id)
        .bind(data.medication_id)
        .bind(data.current_quantity)
        .bind(data.alert_quantity)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update inventory item", e)
        })
    }

    /// Delete an inventory item, scoped to its owner.
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM inventory_items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete inventory item", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
