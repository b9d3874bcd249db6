//! Medication CRUD operations scoped to the owning user.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use medtrack_core::error::AppError;
use medtrack_core::types::pagination::{PageRequest, PageResponse};
use medtrack_database::repositories::medication::MedicationRepository;
use medtrack_entity::medication::{CreateMedication, Medication, UpdateMedication};

use crate::context::RequestContext;

/// Fields accepted when creating or updating a medication.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MedicationInput {
    /// Full name.
    pub full_name: String,
    /// Simplified name.
    pub short_name: Option<String>,
    /// Dosage description.
    pub dosage: Option<String>,
    /// Pharmaceutical form.
    pub form: Option<String>,
    /// Photo URL.
    pub photo_url: Option<String>,
}

/// Manages medication CRUD operations.
#[derive(Debug, Clone)]
pub struct MedicationService {
    /// Medication repository.
    repo: Arc<MedicationRepository>,
}

impl MedicationService {
    /// Creates a new medication service.
    pub fn new(repo: Arc<MedicationRepository>) -> Self {
        Self { repo }
    }

    /// Lists the caller's medications.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Medication>, AppError> {
        self.repo.find_all_for_user(ctx.user_id, &page).await
    }

    /// Gets one of the caller's medications by ID.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Medication, AppError> {
        self.repo
            .find_by_id_for_user(id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Medication not found"))
    }

    /// Searches the caller's medications by name.
    pub async fn search(
        &self,
        ctx: &RequestContext,
        name: &str,
        page: PageRequest,
    ) -> Result<PageResponse<Medication>, AppError> {
        self.repo.search_for_user(ctx.user_id, name, &page).await
    }

    /// Creates a medication for the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: MedicationInput,
    ) -> Result<Medication, AppError> {
        let medication = self
            .repo
            .create(&CreateMedication {
                user_id: ctx.user_id,
                full_name: input.full_name,
                short_name: input.short_name,
                dosage: input.dosage,
                form: input.form,
                photo_url: input.photo_url,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            medication_id = %medication.id,
            "Medication created"
        );

        Ok(medication)
    }

    /// Updates one of the caller's medications.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: MedicationInput,
    ) -> Result<Medication, AppError> {
        self.repo
            .update(
                ctx.user_id,
                &UpdateMedication {
                    id,
                    full_name: input.full_name,
                    short_name: input.short_name,
                    dosage: input.dosage,
                    form: input.form,
                    photo_url: input.photo_url,
                },
            )
            .await?
            .ok_or_else(|| AppError::not_found("Medication not found"))
    }

    /// Deletes one of the caller's medications.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id, ctx.user_id).await? {
            return Err(AppError::not_found("Medication not found"));
        }

        info!(user_id = %ctx.user_id, medication_id = %id, "Medication deleted");
        Ok(())
    }
}
