//! Health-record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::MetricKind;

/// A single health measurement logged by a user.
///
/// Only the field group of the record's kind is populated; writes null out
/// the fields of the other variant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HealthRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
    /// Which metric this record holds.
    pub kind: MetricKind,
    /// Systolic pressure (mmHg), blood-pressure records only.
    pub systolic: Option<i32>,
    /// Diastolic pressure (mmHg), blood-pressure records only.
    pub diastolic: Option<i32>,
    /// Pulse (bpm), blood-pressure records only.
    pub pulse: Option<i32>,
    /// Glucose level (mg/dL), glucose records only.
    pub glucose_level: Option<f64>,
    /// Whether the glucose reading was taken fasting.
    pub fasting: Option<bool>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// When the measurement was taken.
    pub recorded_at: DateTime<Utc>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new health record. The service layer has
/// already nulled out the fields of the unselected variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHealthRecord {
    /// The owning user.
    pub user_id: Uuid,
    /// Metric kind.
    pub kind: MetricKind,
    /// Systolic pressure.
    pub systolic: Option<i32>,
    /// Diastolic pressure.
    pub diastolic: Option<i32>,
    /// Pulse.
    pub pulse: Option<i32>,
    /// Glucose level.
    pub glucose_level: Option<f64>,
    /// Fasting flag.
    pub fasting: Option<bool>,
    /// Notes.
    pub notes: Option<String>,
    /// When the measurement was taken.
    pub recorded_at: DateTime<Utc>,
}

/// Data for updating an existing health record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateHealthRecord {
    /// The record ID to update.
    pub id: Uuid,
    /// New metric kind.
    pub kind: MetricKind,
    /// New systolic pressure.
    pub systolic: Option<i32>,
    /// New diastolic pressure.
    pub diastolic: Option<i32>,
    /// New pulse.
    pub pulse: Option<i32>,
    /// New glucose level.
    pub glucose_level: Option<f64>,
    /// New fasting flag.
    pub fasting: Option<bool>,
    /// New notes.
    pub notes: Option<String>,
    /// New measurement timestamp.
    pub recorded_at: DateTime<Utc>,
}
