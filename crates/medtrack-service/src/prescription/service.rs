//! Prescription CRUD with explicit item management.
//!
//! Items referenced to a registered medication are checked against the
//! caller's own medications; a reference to someone else's medication is
//! indistinguishable from a missing one.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::info;
use uuid::Uuid;

use medtrack_core::error::AppError;
use medtrack_core::types::pagination::{PageRequest, PageResponse};
use medtrack_database::repositories::medication::MedicationRepository;
use medtrack_database::repositories::prescription::PrescriptionRepository;
use medtrack_entity::prescription::{
    CreatePrescription, CreatePrescriptionItem, Prescription, PrescriptionItem, UpdatePrescription,
};

use crate::context::RequestContext;

/// Fields accepted for one prescription item.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PrescriptionItemInput {
    /// Referenced medication (optional).
    pub medication_id: Option<Uuid>,
    /// Description.
    pub description: String,
    /// Dosing instructions.
    pub instructions: String,
    /// Quantity.
    pub quantity: Option<i32>,
}

/// Fields accepted when creating or updating a prescription.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PrescriptionInput {
    /// Doctor's name.
    pub doctor_name: Option<String>,
    /// Doctor's registration number.
    pub doctor_registration: Option<String>,
    /// Issue date.
    pub issued_on: NaiveDate,
    /// Expiry date.
    pub expires_on: Option<NaiveDate>,
    /// Notes.
    pub notes: Option<String>,
    /// Image URL.
    pub image_url: Option<String>,
    /// Items; the submitted set fully replaces the stored one on update.
    pub items: Vec<PrescriptionItemInput>,
}

/// Manages prescriptions and their items.
#[derive(Debug, Clone)]
pub struct PrescriptionService {
    /// Prescription repository.
    prescription_repo: Arc<PrescriptionRepository>,
    /// Medication repository, for item reference checks.
    medication_repo: Arc<MedicationRepository>,
}

impl PrescriptionService {
    /// Creates a new prescription service.
    pub fn new(
        prescription_repo: Arc<PrescriptionRepository>,
        medication_repo: Arc<MedicationRepository>,
    ) -> Self {
        Self {
            prescription_repo,
            medication_repo,
        }
    }

    /// Lists the caller's prescriptions.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<(Prescription, Vec<PrescriptionItem>)>, AppError> {
        let prescriptions = self
            .prescription_repo
            .find_all_for_user(ctx.user_id, &page)
            .await?;

        let mut items_per_page = Vec::with_capacity(prescriptions.items.len());
        for prescription in prescriptions.items {
            let items = self.prescription_repo.find_items(prescription.id).await?;
            items_per_page.push((prescription, items));
        }

        Ok(PageResponse {
            items: items_per_page,
            page: prescriptions.page,
            page_size: prescriptions.page_size,
            total_items: prescriptions.total_items,
            total_pages: prescriptions.total_pages,
            has_next: prescriptions.has_next,
            has_previous: prescriptions.has_previous,
        })
    }

    /// Gets one of the caller's prescriptions with its items.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<(Prescription, Vec<PrescriptionItem>), AppError> {
        let prescription = self
            .prescription_repo
            .find_by_id_for_user(id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Prescription not found"))?;

        let items = self.prescription_repo.find_items(prescription.id).await?;
        Ok((prescription, items))
    }

    /// Lists the caller's prescriptions still current today.
    pub async fn list_current(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<(Prescription, Vec<PrescriptionItem>)>, AppError> {
        let today = Local::now().date_naive();
        let prescriptions = self
            .prescription_repo
            .find_current_for_user(ctx.user_id, today)
            .await?;

        let mut result = Vec::with_capacity(prescriptions.len());
        for prescription in prescriptions {
            let items = self.prescription_repo.find_items(prescription.id).await?;
            result.push((prescription, items));
        }

        Ok(result)
    }

    /// Searches the caller's prescriptions by doctor name.
    pub async fn search_by_doctor(
        &self,
        ctx: &RequestContext,
        doctor_name: &str,
        page: PageRequest,
    ) -> Result<PageResponse<(Prescription, Vec<PrescriptionItem>)>, AppError> {
        let prescriptions = self
            .prescription_repo
            .search_by_doctor_for_user(ctx.user_id, doctor_name, &page)
            .await?;

        let mut items_per_page = Vec::with_capacity(prescriptions.items.len());
        for prescription in prescriptions.items {
            let items = self.prescription_repo.find_items(prescription.id).await?;
            items_per_page.push((prescription, items));
        }

        Ok(PageResponse {
            items: items_per_page,
            page: prescriptions.page,
            page_size: prescriptions.page_size,
            total_items: prescriptions.total_items,
            total_pages: prescriptions.total_pages,
            has_next: prescriptions.has_next,
            has_previous: prescriptions.has_previous,
        })
    }

    /// Creates a prescription with its items for the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: PrescriptionInput,
    ) -> Result<(Prescription, Vec<PrescriptionItem>), AppError> {
        let items = self.check_item_references(ctx, input.items).await?;

        let (prescription, items) = self
            .prescription_repo
            .create(&CreatePrescription {
                user_id: ctx.user_id,
                doctor_name: input.doctor_name,
                doctor_registration: input.doctor_registration,
                issued_on: input.issued_on,
                expires_on: input.expires_on,
                notes: input.notes,
                image_url: input.image_url,
                items,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            prescription_id = %prescription.id,
            items = items.len(),
            "Prescription created"
        );

        Ok((prescription, items))
    }

    /// Updates one of the caller's prescriptions, replacing its items.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: PrescriptionInput,
    ) -> Result<(Prescription, Vec<PrescriptionItem>), AppError> {
        let items = self.check_item_references(ctx, input.items).await?;

        self.prescription_repo
            .update(
                ctx.user_id,
                &UpdatePrescription {
                    id,
                    doctor_name: input.doctor_name,
                    doctor_registration: input.doctor_registration,
                    issued_on: input.issued_on,
                    expires_on: input.expires_on,
                    notes: input.notes,
                    image_url: input.image_url,
                    items,
                },
            )
            .await?
            .ok_or_else(|| AppError::not_found("Prescription not found"))
    }

    /// Deletes one of the caller's prescriptions and its items.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        if !self.prescription_repo.delete(id, ctx.user_id).await? {
            return Err(AppError::not_found("Prescription not found"));
        }

        info!(user_id = %ctx.user_id, prescription_id = %id, "Prescription deleted");
        Ok(())
    }

    /// Resolve each item's medication reference against the caller's own
    /// medications.
    async fn check_item_references(
        &self,
        ctx: &RequestContext,
        items: Vec<PrescriptionItemInput>,
    ) -> Result<Vec<CreatePrescriptionItem>, AppError> {
        let mut checked = Vec::with_capacity(items.len());

        for item in items {
            if let Some(medication_id) = item.medication_id {
                self.medication_repo
                    .find_by_id_for_user(medication_id, ctx.user_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Medication not found"))?;
            }

            checked.push(CreatePrescriptionItem {
                medication_id: item.medication_id,
                description: item.description,
                instructions: item.instructions,
                quantity: item.quantity,
            });
        }

        Ok(checked)
    }
}
