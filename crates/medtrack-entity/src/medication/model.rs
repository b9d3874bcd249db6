//! Medication entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A medication registered by a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Medication {
    /// Unique medication identifier.
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
    /// Full commercial/clinical name.
    pub full_name: String,
    /// Simplified name for display.
    pub short_name: Option<String>,
    /// Dosage description (e.g. "500mg").
    pub dosage: Option<String>,
    /// Pharmaceutical form (tablet, syrup, ...).
    pub form: Option<String>,
    /// URL of a photo of the medication.
    pub photo_url: Option<String>,
    /// When the medication was created.
    pub created_at: DateTime<Utc>,
    /// When the medication was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new medication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMedication {
    /// The owning user.
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
}

/// Data for updating an existing medication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMedication {
    /// The medication ID to update.
    pub id: Uuid,
    /// New full name.
    pub full_name: String,
    /// New simplified name.
    pub short_name: Option<String>,
    /// New dosage description.
    pub dosage: Option<String>,
    /// New pharmaceutical form.
    pub form: Option<String>,
    /// New photo URL.
    pub photo_url: Option<String>,
}
