//! Dosage reminder CRUD operations.

use std::sync::Arc;

use chrono::NaiveTime;
use tracing::info;
use uuid::Uuid;

use medtrack_core::error::AppError;
use medtrack_core::types::pagination::{PageRequest, PageResponse};
use medtrack_database::repositories::medication::MedicationRepository;
use medtrack_database::repositories::reminder::ReminderRepository;
use medtrack_entity::reminder::{CreateReminder, Reminder, UpdateReminder};

use crate::context::RequestContext;

/// Fields accepted when creating or updating a reminder.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ReminderInput {
    /// The medication to take.
    pub medication_id: Uuid,
    /// Times of day the dose is due.
    pub times: Vec<NaiveTime>,
    /// Applicable weekdays, 0 = Sunday .. 6 = Saturday; empty means daily.
    pub weekdays: Option<Vec<i32>>,
    /// Units per dose.
    pub dose_quantity: Option<f64>,
    /// Free-form instructions.
    pub instructions: Option<String>,
    /// Whether the reminder is active.
    pub active: bool,
}

/// Manages dosage reminders.
#[derive(Debug, Clone)]
pub struct ReminderService {
    /// Reminder repository.
    reminder_repo: Arc<ReminderRepository>,
    /// Medication repository, for reference checks.
    medication_repo: Arc<MedicationRepository>,
}

impl ReminderService {
    /// Creates a new reminder service.
    pub fn new(
        reminder_repo: Arc<ReminderRepository>,
        medication_repo: Arc<MedicationRepository>,
    ) -> Self {
        Self {
            reminder_repo,
            medication_repo,
        }
    }

    /// Lists the caller's reminders.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Reminder>, AppError> {
        self.reminder_repo.find_all_for_user(ctx.user_id, &page).await
    }

    /// Gets one of the caller's reminders by ID.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Reminder, AppError> {
        self.reminder_repo
            .find_by_id_for_user(id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Reminder not found"))
    }

    /// Lists the caller's active reminders.
    pub async fn list_active(&self, ctx: &RequestContext) -> Result<Vec<Reminder>, AppError> {
        self.reminder_repo.find_active_for_user(ctx.user_id).await
    }

    /// Lists the caller's active reminders that apply today.
    pub async fn list_due_today(&self, ctx: &RequestContext) -> Result<Vec<Reminder>, AppError> {
        let active = self.reminder_repo.find_active_for_user(ctx.user_id).await?;
        Ok(active.into_iter().filter(Reminder::is_due_today).collect())
    }

    /// Creates a reminder for the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: ReminderInput,
    ) -> Result<Reminder, AppError> {
        self.check_medication(ctx, input.medication_id).await?;

        let reminder = self
            .reminder_repo
            .create(&CreateReminder {
                user_id: ctx.user_id,
                medication_id: input.medication_id,
                times: input.times,
                weekdays: input.weekdays,
                dose_quantity: input.dose_quantity,
                instructions: input.instructions,
                active: input.active,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            reminder_id = %reminder.id,
            "Reminder created"
        );

        Ok(reminder)
    }

    /// Updates one of the caller's reminders.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: ReminderInput,
    ) -> Result<Reminder, AppError> {
        let existing = self.get(ctx, id).await?;

        if existing.medication_id != input.medication_id {
            self.check_medication(ctx, input.medication_id).await?;
        }

        self.reminder_repo
            .update(
                ctx.user_id,
                &UpdateReminder {
                    id,
                    medication_id: input.medication_id,
                    times: input.times,
                    weekdays: input.weekdays,
                    dose_quantity: input.dose_quantity,
                    instructions: input.instructions,
                    active: input.active,
                },
            )
            .await?
            .ok_or_else(|| AppError::not_found("Reminder not found"))
    }

    /// Deletes one of the caller's reminders.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        if !self.reminder_repo.delete(id, ctx.user_id).await? {
            return Err(AppError::not_found("Reminder not found"));
        }

        info!(user_id = %ctx.user_id, reminder_id = %id, "Reminder deleted");
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
