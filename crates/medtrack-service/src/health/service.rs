//! Health-record CRUD operations with variant-consistency enforcement.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use medtrack_core::error::AppError;
use medtrack_core::types::pagination::{PageRequest, PageResponse};
use medtrack_database::repositories::health::HealthRecordRepository;
use medtrack_entity::health::{
    CreateHealthRecord, HealthRecord, MetricKind, UpdateHealthRecord,
};

use crate::context::RequestContext;

/// Default number of records returned by the latest-measurements query.
const DEFAULT_LATEST_LIMIT: i64 = 10;

/// Fields accepted when creating or updating a health record.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HealthRecordInput {
    /// Metric kind.
    pub kind: MetricKind,
    /// Systolic pressure, blood-pressure records.
    pub systolic: Option<i32>,
    /// Diastolic pressure, blood-pressure records.
    pub diastolic: Option<i32>,
    /// Pulse, blood-pressure records.
    pub pulse: Option<i32>,
    /// Glucose level, glucose records.
    pub glucose_level: Option<f64>,
    /// Fasting flag, glucose records.
    pub fasting: Option<bool>,
    /// Notes.
    pub notes: Option<String>,
    /// When the measurement was taken; defaults to now on create.
    pub recorded_at: Option<DateTime<Utc>>,
}

/// Manages health-monitoring records.
#[derive(Debug, Clone)]
pub struct HealthService {
    /// Health-record repository.
    repo: Arc<HealthRecordRepository>,
}

impl HealthService {
    /// Creates a new health service.
    pub fn new(repo: Arc<HealthRecordRepository>) -> Self {
        Self { repo }
    }

    /// Lists the caller's records.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<HealthRecord>, AppError> {
        self.repo.find_all_for_user(ctx.user_id, &page).await
    }

    /// Gets one of the caller's records by ID.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<HealthRecord, AppError> {
        self.repo
            .find_by_id_for_user(id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Health record not found"))
    }

    /// Lists the caller's records of one kind.
    pub async fn list_by_kind(
        &self,
        ctx: &RequestContext,
        kind: MetricKind,
        page: PageRequest,
    ) -> Result<PageResponse<HealthRecord>, AppError> {
        self.repo.find_by_kind_for_user(ctx.user_id, kind, &page).await
    }

    /// Lists the caller's most recent measurements.
    pub async fn latest(
        &self,
        ctx: &RequestContext,
        limit: Option<i64>,
    ) -> Result<Vec<HealthRecord>, AppError> {
        let limit = limit.unwrap_or(DEFAULT_LATEST_LIMIT).clamp(1, 100);
        self.repo.find_latest_for_user(ctx.user_id, limit).await
    }

    /// Lists the caller's records measured inside a time window.
    pub async fn list_between(
        &self,
        ctx: &RequestContext,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<PageResponse<HealthRecord>, AppError> {
        self.repo
            .find_between_for_user(ctx.user_id, from, to, &page)
            .await
    }

    /// Creates a record for the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: HealthRecordInput,
    ) -> Result<HealthRecord, AppError> {
        check_variant(&input)?;
        let fields = variant_fields(&input);

        let record = self
            .repo
            .create(&CreateHealthRecord {
                user_id: ctx.user_id,
                kind: input.kind,
                systolic: fields.systolic,
                diastolic: fields.diastolic,
                pulse: fields.pulse,
                glucose_level: fields.glucose_level,
                fasting: fields.fasting,
                notes: input.notes,
                recorded_at: input.recorded_at.unwrap_or_else(Utc::now),
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            record_id = %record.id,
            kind = %record.kind,
            "Health record created"
        );

        Ok(record)
    }

    /// Updates one of the caller's records.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: HealthRecordInput,
    ) -> Result<HealthRecord, AppError> {
        let existing = self.get(ctx, id).await?;

        check_variant(&input)?;
        let fields = variant_fields(&input);

        self.repo
            .update(
                ctx.user_id,
                &UpdateHealthRecord {
                    id,
                    kind: input.kind,
                    systolic: fields.systolic,
                    diastolic: fields.diastolic,
                    pulse: fields.pulse,
                    glucose_level: fields.glucose_level,
                    fasting: fields.fasting,
                    notes: input.notes,
                    recorded_at: input.recorded_at.unwrap_or(existing.recorded_at),
                },
            )
            .await?
            .ok_or_else(|| AppError::not_found("Health record not found"))
    }

    /// Deletes one of the caller's records.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id, ctx.user_id).await? {
            return Err(AppError::not_found("Health record not found"));
        }

        info!(user_id = %ctx.user_id, record_id = %id, "Health record deleted");
        Ok(())
    }
}

/// The measurement fields of one record, with the unselected variant
/// nulled out.
struct VariantFields {
    systolic: Option<i32>,
    diastolic: Option<i32>,
    pulse: Option<i32>,
    glucose_level: Option<f64>,
    fasting: Option<bool>,
}

/// Reject input whose fields are inconsistent with the declared kind.
fn check_variant(input: &HealthRecordInput) -> Result<(), AppError> {
    match input.kind {
        MetricKind::BloodPressure => {
            if input.systolic.is_none() || input.diastolic.is_none() {
                return Err(AppError::validation(
                    "Blood-pressure records require systolic and diastolic values",
                ));
            }
        }
        MetricKind::Glucose => {
            if input.glucose_level.is_none() {
                return Err(AppError::validation(
                    "Glucose records require a glucose level",
                ));
            }
        }
    }
    Ok(())
}

/// Keep the fields of the declared variant and null out the rest.
fn variant_fields(input: &HealthRecordInput) -> VariantFields {
    match input.kind {
        MetricKind::BloodPressure => VariantFields {
            systolic: input.systolic,
            diastolic: input.diastolic,
            pulse: input.pulse,
            glucose_level: None,
            fasting: None,
        },
        MetricKind::Glucose => VariantFields {
            systolic: None,
            diastolic: None,
            pulse: None,
            glucose_level: input.glucose_level,
            fasting: input.fasting,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(kind: MetricKind) -> HealthRecordInput {
        HealthRecordInput {
            kind,
            systolic: Some(120),
            diastolic: Some(80),
            pulse: Some(70),
            glucose_level: Some(95.0),
            fasting: Some(true),
            notes: None,
            recorded_at: None,
        }
    }

    #[test]
    fn test_pressure_record_nulls_glucose_fields() {
        let fields = variant_fields(&input(MetricKind::BloodPressure));
        assert_eq!(fields.systolic, Some(120));
        assert!(fields.glucose_level.is_none());
        assert!(fields.fasting.is_none());
    }

    #[test]
    fn test_glucose_record_nulls_pressure_fields() {
        let fields = variant_fields(&input(MetricKind::Glucose));
        assert_eq!(fields.glucose_level, Some(95.0));
        assert!(fields.systolic.is_none());
        assert!(fields.diastolic.is_none());
        assert!(fields.pulse.is_none());
    }

    #[test]
    fn test_pressure_record_requires_both_pressure_values() {
        let mut bad = input(MetricKind::BloodPressure);
        bad.diastolic = None;
        assert!(check_variant(&bad).is_err());
    }

    #[test]
    fn test_glucose_record_requires_a_level() {
        let mut bad = input(MetricKind::Glucose);
        bad.glucose_level = None;
        assert!(check_variant(&bad).is_err());
    }
}
