//! Personal inventory CRUD operations.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use medtrack_core::error::AppError;
use medtrack_core::types::pagination::{PageRequest, PageResponse};
use medtrack_database::repositories::inventory::InventoryRepository;
use medtrack_database::repositories::medication::MedicationRepository;
use medtrack_entity::inventory::{CreateInventoryItem, InventoryItem, UpdateInventoryItem};

use crate::context::RequestContext;

/// Fields accepted when creating or updating an inventory item.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct InventoryInput {
    /// The stocked medication.
    pub medication_id: Uuid,
    /// Quantity on hand.
    pub current_quantity: i32,
    /// Alert threshold.
    pub alert_quantity: i32,
}

/// Manages personal inventory items.
#[derive(Debug, Clone)]
pub struct InventoryService {
    /// Inventory repository.
    inventory_repo: Arc<InventoryRepository>,
    /// Medication repository, for reference checks.
    medication_repo: Arc<MedicationRepository>,
}

impl InventoryService {
    /// Creates a new inventory service.
    pub fn new(
        inventory_repo: Arc<InventoryRepository>,
        medication_repo: Arc<MedicationRepository>,
    ) -> Self {
        Self {
            inventory_repo,
            medication_repo,
        }
    }

    /// Lists the caller's inventory.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<InventoryItem>, AppError> {
        self.inventory_repo.find_all_for_user(ctx.user_id, &page).await
    }

    /// Gets one of the caller's inventory items by ID.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<InventoryItem, AppError> {
        self.inventory_repo
            .find_by_id_for_user(id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Inventory item not found"))
    }

    /// Lists the caller's items at or below their alert threshold.
    pub async fn list_low_stock(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<InventoryItem>, AppError> {
        self.inventory_repo.find_low_stock_for_user(ctx.user_id).await
    }

    /// Creates an inventory item for the caller.
    ///
    /// When the caller already stocks the referenced medication, the
    /// submitted quantity is added to the existing row and the alert
    /// threshold replaced, instead of creating a duplicate.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: InventoryInput,
    ) -> Result<InventoryItem, AppError> {
        self.check_medication(ctx, input.medication_id).await?;

        if let Some(existing) = self
            .inventory_repo
            .find_by_user_and_medication(ctx.user_id, input.medication_id)
            .await?
        {
            let merged = self
                .inventory_repo
                .update(
                    ctx.user_id,
                    &UpdateInventoryItem {
                        id: existing.id,
                        medication_id: existing.medication_id,
                        current_quantity: existing.current_quantity + input.current_quantity,
                        alert_quantity: input.alert_quantity,
                    },
                )
                .await?
                .ok_or_else(|| AppError::not_found("Inventory item not found"))?;

            return Ok(merged);
        }

        let item = self
            .inventory_repo
            .create(&CreateInventoryItem {
                user_id: ctx.user_id,
                medication_id: input.medication_id,
                current_quantity: input.current_quantity,
                alert_quantity: input.alert_quantity,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            inventory_id = %item.id,
            "Inventory item created"
        );

        Ok(item)
    }

    /// Updates one of the caller's inventory items.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: InventoryInput,
    ) -> Result<InventoryItem, AppError> {
        let existing = self.get(ctx, id).await?;

        if existing.medication_id != input.medication_id {
            self.check_medication(ctx, input.medication_id).await?;
        }

        self.inventory_repo
            .update(
                ctx.user_id,
                &UpdateInventoryItem {
                    id,
                    medication_id: input.medication_id,
                    current_quantity: input.current_quantity,
                    alert_quantity: input.alert_quantity,
                },
            )
            .await?
            .ok_or_else(|| AppError::not_found("Inventory item not found"))
    }

    /// Deletes one of the caller's inventory items.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        if !self.inventory_repo.delete(id, ctx.user_id).await? {
            return Err(AppError::not_found("Inventory item not found"));
        }

        info!(user_id = %ctx.user_id, inventory_id = %id, "Inventory item deleted");
        Ok(())
    }

    /// Verify a referenced medication belongs to the caller.
    async fn check_medication(
        &self,
        ctx: &RequestContext,
        medication_id: Uuid,
    ) -> Result<(), AppError> {
        self.medication_repo
            .find_by_id_for_user(medication_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Medication not found"))?;
        Ok(())
    }
}
