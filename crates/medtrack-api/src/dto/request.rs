//! Request DTOs.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use medtrack_entity::health::MetricKind;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Full display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// National identity number (11 digits, optional).
    pub national_id: Option<String>,
    /// Birth date.
    pub birth_date: Option<NaiveDate>,
    /// Raw password.
    pub password: String,
    /// Phone number (digits only).
    pub phone: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Raw password.
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    /// The opaque refresh token.
    pub refresh_token: String,
}

/// Profile update request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    /// Full display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// National identity number.
    pub national_id: Option<String>,
    /// Birth date.
    pub birth_date: Option<NaiveDate>,
    /// New raw password; omit to keep the current one.
    pub password: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
}

/// Medication create/update request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationRequest {
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

/// One item of a prescription create/update request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionItemRequest {
    /// Referenced medication (optional).
    pub medication_id: Option<Uuid>,
    /// Description.
    pub description: String,
    /// Dosing instructions.
    pub instructions: String,
    /// Quantity.
    pub quantity: Option<i32>,
}

/// Prescription create/update request body. The submitted items replace
/// the stored set on update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionRequest {
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
    /// Items.
    #[serde(default)]
    pub items: Vec<PrescriptionItemRequest>,
}

/// Inventory create/update request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRequest {
    /// The stocked medication.
    pub medication_id: Uuid,
    /// Quantity on hand.
    pub current_quantity: i32,
    /// Alert threshold.
    pub alert_quantity: i32,
}

/// Reminder create/update request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRequest {
    /// The medication to take.
    pub medication_id: Uuid,
    /// Times of day the dose is due.
    pub times: Vec<NaiveTime>,
    /// Applicable weekdays, 0 = Sunday .. 6 = Saturday.
    pub weekdays: Option<Vec<i32>>,
    /// Units per dose.
    pub dose_quantity: Option<f64>,
    /// Free-form instructions.
    pub instructions: Option<String>,
    /// Whether the reminder is active.
    #[serde(default = "default_true")]
    pub active: bool,
}

/// Health-record create/update request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecordRequest {
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
    /// When the measurement was taken; defaults to now.
    pub recorded_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}
