//! Prescription entity model.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A medical prescription.
///
/// Items belong exclusively to their prescription: they are replaced as a
/// unit on update and deleted with the parent.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Prescription {
    /// Unique prescription identifier.
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
    /// Prescribing doctor's name.
    pub doctor_name: Option<String>,
    /// Doctor's professional registration number.
    pub doctor_registration: Option<String>,
    /// Date the prescription was issued.
    pub issued_on: NaiveDate,
    /// Expiry date; `None` means the prescription never expires.
    pub expires_on: Option<NaiveDate>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// URL of a scanned image of the prescription.
    pub image_url: Option<String>,
    /// When the prescription was created.
    pub created_at: DateTime<Utc>,
}

impl Prescription {
    /// Check whether the prescription is current on the given date.
    ///
    /// A prescription with no expiry date is always current; one expiring
    /// exactly on `date` is still current.
    pub fn is_current_on(&self, date: NaiveDate) -> bool {
        match self.expires_on {
            None => true,
            Some(expires_on) => date <= expires_on,
        }
    }

    /// Check whether the prescription is current today (server-local date).
    pub fn is_current(&self) -> bool {
        self.is_current_on(Local::now().date_naive())
    }
}

/// A single medication line in a prescription.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PrescriptionItem {
    /// Unique item identifier.
    pub id: Uuid,
    /// The owning prescription.
    pub prescription_id: Uuid,
    /// Referenced medication, when linked to one the user registered.
    pub medication_id: Option<Uuid>,
    /// Free-form description of the prescribed medication.
    pub description: String,
    /// Dosing instructions.
    pub instructions: String,
    /// Prescribed quantity.
    pub quantity: Option<i32>,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new prescription with its items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePrescription {
    /// The owning user.
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
    /// Items to create with the prescription.
    pub items: Vec<CreatePrescriptionItem>,
}

/// Data for one item of a prescription being created or replaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePrescriptionItem {
    /// Referenced medication (optional).
    pub medication_id: Option<Uuid>,
    /// Description.
    pub description: String,
    /// Dosing instructions.
    pub instructions: String,
    /// Quantity.
    pub quantity: Option<i32>,
}

/// Data for updating an existing prescription. The submitted items fully
/// replace the stored set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePrescription {
    /// The prescription ID to update.
    pub id: Uuid,
    /// New doctor's name.
    pub doctor_name: Option<String>,
    /// New doctor's registration number.
    pub doctor_registration: Option<String>,
    /// New issue date.
    pub issued_on: NaiveDate,
    /// New expiry date.
    pub expires_on: Option<NaiveDate>,
    /// New notes.
    pub notes: Option<String>,
    /// New image URL.
    pub image_url: Option<String>,
    /// Replacement item set.
    pub items: Vec<CreatePrescriptionItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prescription(expires_on: Option<NaiveDate>) -> Prescription {
        Prescription {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            doctor_name: None,
            doctor_registration: None,
            issued_on: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            expires_on,
            notes: None,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_no_expiry_is_always_current() {
        let p = prescription(None);
        assert!(p.is_current_on(NaiveDate::from_ymd_opt(2099, 12, 31).unwrap()));
    }

    #[test]
    fn test_expiring_today_is_still_current() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let p = prescription(Some(today));
        assert!(p.is_current_on(today));
    }

    #[test]
    fn test_expired_yesterday_is_not_current() {
        let expiry = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        let p = prescription(Some(expiry));
        assert!(!p.is_current_on(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()));
    }
}
