//! Response DTOs.
//!
//! Derived fields — `low_stock`, `valid`, `due_today` — are computed from
//! the entities at mapping time and never stored.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use medtrack_auth::session::AuthTokens;
use medtrack_entity::health::{HealthRecord, MetricKind};
use medtrack_entity::inventory::InventoryItem;
use medtrack_entity::medication::Medication;
use medtrack_entity::prescription::{Prescription, PrescriptionItem};
use medtrack_entity::reminder::Reminder;
use medtrack_entity::user::User;

/// Tokens plus identity fields returned by register, login, and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Signed access token.
    pub access_token: String,
    /// Opaque refresh token.
    pub refresh_token: String,
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The authenticated user's email.
    pub email: String,
    /// The authenticated user's display name.
    pub name: String,
}

impl From<AuthTokens> for AuthResponse {
    fn from(tokens: AuthTokens) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            user_id: tokens.user_id,
            email: tokens.email,
            name: tokens.full_name,
        }
    }
}

/// User profile summary. The password hash never leaves the entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Full display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// National identity number.
    pub national_id: Option<String>,
    /// Birth date.
    pub birth_date: Option<NaiveDate>,
    /// Phone number.
    pub phone: Option<String>,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.full_name,
            email: user.email,
            national_id: user.national_id,
            birth_date: user.birth_date,
            phone: user.phone,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Medication representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationResponse {
    /// Medication ID.
    pub id: Uuid,
    /// Owning user ID.
    pub user_id: Uuid,
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
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<Medication> for MedicationResponse {
    fn from(medication: Medication) -> Self {
        Self {
            id: medication.id,
            user_id: medication.user_id,
            full_name: medication.full_name,
            short_name: medication.short_name,
            dosage: medication.dosage,
            form: medication.form,
            photo_url: medication.photo_url,
            created_at: medication.created_at,
            updated_at: medication.updated_at,
        }
    }
}

/// One prescription item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionItemResponse {
    /// Item ID.
    pub id: Uuid,
    /// Owning prescription ID.
    pub prescription_id: Uuid,
    /// Referenced medication.
    pub medication_id: Option<Uuid>,
    /// Description.
    pub description: String,
    /// Dosing instructions.
    pub instructions: String,
    /// Quantity.
    pub quantity: Option<i32>,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<PrescriptionItem> for PrescriptionItemResponse {
    fn from(item: PrescriptionItem) -> Self {
        Self {
            id: item.id,
            prescription_id: item.prescription_id,
            medication_id: item.medication_id,
            description: item.description,
            instructions: item.instructions,
            quantity: item.quantity,
            created_at: item.created_at,
        }
    }
}

/// Prescription representation with its items and computed currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionResponse {
    /// Prescription ID.
    pub id: Uuid,
    /// Owning user ID.
    pub user_id: Uuid,
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
    /// Whether the prescription is still current today.
    pub valid: bool,
    /// Items.
    pub items: Vec<PrescriptionItemResponse>,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<(Prescription, Vec<PrescriptionItem>)> for PrescriptionResponse {
    fn from((prescription, items): (Prescription, Vec<PrescriptionItem>)) -> Self {
        let valid = prescription.is_current();
        Self {
            id: prescription.id,
            user_id: prescription.user_id,
            doctor_name: prescription.doctor_name,
            doctor_registration: prescription.doctor_registration,
            issued_on: prescription.issued_on,
            expires_on: prescription.expires_on,
            notes: prescription.notes,
            image_url: prescription.image_url,
            valid,
            items: items.into_iter().map(Into::into).collect(),
            created_at: prescription.created_at,
        }
    }
}

/// Inventory item representation with computed stock state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryResponse {
    /// Inventory item ID.
    pub id: Uuid,
    /// Owning user ID.
    pub user_id: Uuid,
    /// Stocked medication ID.
    pub medication_id: Uuid,
    /// Units on hand.
    pub current_quantity: i32,
    /// Alert threshold.
    pub alert_quantity: i32,
    /// Whether the stock is at or below the threshold.
    pub low_stock: bool,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<InventoryItem> for InventoryResponse {
    fn from(item: InventoryItem) -> Self {
        let low_stock = item.is_low_stock();
        Self {
            id: item.id,
            user_id: item.user_id,
            medication_id: item.medication_id,
            current_quantity: item.current_quantity,
            alert_quantity: item.alert_quantity,
            low_stock,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Reminder representation with computed due-today flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    /// Reminder ID.
    pub id: Uuid,
    /// Owning user ID.
    pub user_id: Uuid,
    /// Medication ID.
    pub medication_id: Uuid,
    /// Times of day.
    pub times: Vec<NaiveTime>,
    /// Applicable weekdays.
    pub weekdays: Option<Vec<i32>>,
    /// Units per dose.
    pub dose_quantity: Option<f64>,
    /// Instructions.
    pub instructions: Option<String>,
    /// Active flag.
    pub active: bool,
    /// Whether the reminder applies today.
    pub due_today: bool,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<Reminder> for ReminderResponse {
    fn from(reminder: Reminder) -> Self {
        let due_today = reminder.is_due_today();
        Self {
            id: reminder.id,
            user_id: reminder.user_id,
            medication_id: reminder.medication_id,
            times: reminder.times,
            weekdays: reminder.weekdays,
            dose_quantity: reminder.dose_quantity,
            instructions: reminder.instructions,
            active: reminder.active,
            due_today,
            created_at: reminder.created_at,
        }
    }
}

/// Health-record representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecordResponse {
    /// Record ID.
    pub id: Uuid,
    /// Owning user ID.
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
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<HealthRecord> for HealthRecordResponse {
    fn from(record: HealthRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            kind: record.kind,
            systolic: record.systolic,
            diastolic: record.diastolic,
            pulse: record.pulse,
            glucose_level: record.glucose_level,
            fasting: record.fasting,
            notes: record.notes,
            recorded_at: record.recorded_at,
            created_at: record.created_at,
        }
    }
}

/// Liveness probe response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}
