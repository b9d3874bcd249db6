//! Explicit per-request validation.
//!
//! Each request DTO has one validation function returning a field ->
//! message map on failure; handlers call it before any mutation.

use std::collections::BTreeMap;

use chrono::{Local, Utc};

use medtrack_core::error::AppError;

use super::request::{
    HealthRecordRequest, InventoryRequest, LoginRequest, MedicationRequest, PrescriptionRequest,
    RefreshTokenRequest, RegisterRequest, ReminderRequest, UpdateUserRequest,
};

/// Collects field-level failures and converts into an [`AppError`].
#[derive(Debug, Default)]
struct FieldErrors {
    fields: BTreeMap<String, String>,
}

impl FieldErrors {
    fn add(&mut self, field: &str, message: &str) {
        // First failure per field wins.
        self.fields
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    fn finish(self) -> Result<(), AppError> {
        if self.fields.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation_fields(self.fields))
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

fn is_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://") || value.starts_with("ftp://")
}

/// Shared checks for the user identity fields.
fn check_identity(
    errors: &mut FieldErrors,
    name: &str,
    email: &str,
    national_id: Option<&str>,
    birth_date: Option<chrono::NaiveDate>,
    phone: Option<&str>,
) {
    if is_blank(name) {
        errors.add("name", "Name is required");
    } else if name.len() < 3 || name.len() > 100 {
        errors.add("name", "Name must be between 3 and 100 characters");
    }

    if is_blank(email) {
        errors.add("email", "Email is required");
    } else if !email.contains('@') || email.len() > 100 {
        errors.add("email", "Email must be valid");
    }

    if let Some(national_id) = national_id {
        if national_id.len() != 11 || !is_digits(national_id) {
            errors.add("nationalId", "National ID must contain 11 digits");
        }
    }

    if let Some(birth_date) = birth_date {
        if birth_date >= Local::now().date_naive() {
            errors.add("birthDate", "Birth date must be in the past");
        }
    }

    if let Some(phone) = phone {
        if phone.len() < 10 || phone.len() > 20 || !is_digits(phone) {
            errors.add("phone", "Phone must contain between 10 and 20 digits");
        }
    }
}

/// Validate a registration request.
pub fn validate_register(req: &RegisterRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::default();

    check_identity(
        &mut errors,
        &req.name,
        &req.email,
        req.national_id.as_deref(),
        req.birth_date,
        req.phone.as_deref(),
    );

    if is_blank(&req.password) {
        errors.add("password", "Password is required");
    } else if req.password.len() < 6 || req.password.len() > 100 {
        errors.add("password", "Password must be between 6 and 100 characters");
    }

    errors.finish()
}

/// Validate a login request.
pub fn validate_login(req: &LoginRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::default();

    if is_blank(&req.email) {
        errors.add("email", "Email is required");
    }
    if is_blank(&req.password) {
        errors.add("password", "Password is required");
    }

    errors.finish()
}

/// Validate a refresh-token request.
pub fn validate_refresh(req: &RefreshTokenRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::default();

    if is_blank(&req.refresh_token) {
        errors.add("refreshToken", "Refresh token is required");
    }

    errors.finish()
}

/// Validate a profile update request.
pub fn validate_update_user(req: &UpdateUserRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::default();

    check_identity(
        &mut errors,
        &req.name,
        &req.email,
        req.national_id.as_deref(),
        req.birth_date,
        req.phone.as_deref(),
    );

    if let Some(password) = req.password.as_deref() {
        if !password.is_empty() && (password.len() < 6 || password.len() > 100) {
            errors.add("password", "Password must be between 6 and 100 characters");
        }
    }

    errors.finish()
}

/// Validate a medication request.
pub fn validate_medication(req: &MedicationRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::default();

    if is_blank(&req.full_name) {
        errors.add("fullName", "Full name is required");
    } else if req.full_name.len() > 100 {
        errors.add("fullName", "Full name must be at most 100 characters");
    }

    if let Some(short_name) = req.short_name.as_deref() {
        if short_name.len() > 50 {
            errors.add("shortName", "Short name must be at most 50 characters");
        }
    }

    if let Some(dosage) = req.dosage.as_deref() {
        if dosage.len() > 50 {
            errors.add("dosage", "Dosage must be at most 50 characters");
        }
    }

    if let Some(form) = req.form.as_deref() {
        if form.len() > 30 {
            errors.add("form", "Form must be at most 30 characters");
        }
    }

    if let Some(photo_url) = req.photo_url.as_deref() {
        if !is_url(photo_url) {
            errors.add("photoUrl", "Photo URL must be a valid URL");
        }
    }

    errors.finish()
}

/// Validate a prescription request.
pub fn validate_prescription(req: &PrescriptionRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::default();

    if req.issued_on > Local::now().date_naive() {
        errors.add("issuedOn", "Issue date must be in the past or present");
    }

    if let Some(doctor_name) = req.doctor_name.as_deref() {
        if doctor_name.len() > 100 {
            errors.add("doctorName", "Doctor name must be at most 100 characters");
        }
    }

    if let Some(doctor_registration) = req.doctor_registration.as_deref() {
        if doctor_registration.len() > 20 {
            errors.add(
                "doctorRegistration",
                "Doctor registration must be at most 20 characters",
            );
        }
    }

    if let Some(image_url) = req.image_url.as_deref() {
        if !is_url(image_url) {
            errors.add("imageUrl", "Image URL must be a valid URL");
        }
    }

    for (index, item) in req.items.iter().enumerate() {
        if is_blank(&item.description) {
            errors.add(&format!("items[{index}].description"), "Description is required");
        }
        if is_blank(&item.instructions) {
            errors.add(
                &format!("items[{index}].instructions"),
                "Instructions are required",
            );
        }
        if let Some(quantity) = item.quantity {
            if quantity < 0 {
                errors.add(
                    &format!("items[{index}].quantity"),
                    "Quantity must be zero or positive",
                );
            }
        }
    }

    errors.finish()
}

/// Validate an inventory request.
pub fn validate_inventory(req: &InventoryRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::default();

    if req.current_quantity < 0 {
        errors.add("currentQuantity", "Current quantity cannot be negative");
    }
    if req.alert_quantity <= 0 {
        errors.add("alertQuantity", "Alert quantity must be positive");
    }

    errors.finish()
}

/// Validate a reminder request.
pub fn validate_reminder(req: &ReminderRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::default();

    if req.times.is_empty() {
        errors.add("times", "At least one time of day is required");
    }

    if let Some(weekdays) = &req.weekdays {
        if weekdays.iter().any(|day| !(0..=6).contains(day)) {
            errors.add("weekdays", "Weekdays must be between 0 (Sunday) and 6 (Saturday)");
        }
    }

    if let Some(dose_quantity) = req.dose_quantity {
        if dose_quantity <= 0.0 {
            errors.add("doseQuantity", "Dose quantity must be positive");
        }
    }

    if let Some(instructions) = req.instructions.as_deref() {
        if instructions.len() > 1000 {
            errors.add("instructions", "Instructions must be at most 1000 characters");
        }
    }

    errors.finish()
}

/// Validate a health-record request. Variant consistency (which field
/// group the kind requires) is enforced by the service.
pub fn validate_health_record(req: &HealthRecordRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::default();

    if let Some(systolic) = req.systolic {
        if !(50..=300).contains(&systolic) {
            errors.add("systolic", "Systolic value must be between 50 and 300");
        }
    }

    if let Some(diastolic) = req.diastolic {
        if !(30..=200).contains(&diastolic) {
            errors.add("diastolic", "Diastolic value must be between 30 and 200");
        }
    }

    if let Some(pulse) = req.pulse {
        if !(1..=250).contains(&pulse) {
            errors.add("pulse", "Pulse must be between 1 and 250");
        }
    }

    if let Some(glucose_level) = req.glucose_level {
        if glucose_level <= 0.0 {
            errors.add("glucoseLevel", "Glucose level must be positive");
        }
    }

    if let Some(notes) = req.notes.as_deref() {
        if notes.len() > 1000 {
            errors.add("notes", "Notes must be at most 1000 characters");
        }
    }

    if let Some(recorded_at) = req.recorded_at {
        if recorded_at > Utc::now() {
            errors.add("recordedAt", "Record date must be in the past or present");
        }
    }

    errors.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use medtrack_entity::health::MetricKind;

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            name: "Maria Silva".to_string(),
            email: "maria@example.com".to_string(),
            national_id: Some("12345678901".to_string()),
            birth_date: chrono::NaiveDate::from_ymd_opt(1960, 5, 1),
            password: "secret1".to_string(),
            phone: Some("11987654321".to_string()),
        }
    }

    #[test]
    fn test_valid_registration_passes() {
        assert!(validate_register(&register_request()).is_ok());
    }

    #[test]
    fn test_registration_failures_are_field_mapped() {
        let mut req = register_request();
        req.email = "not-an-email".to_string();
        req.password = "abc".to_string();
        req.national_id = Some("12x".to_string());

        let err = validate_register(&req).unwrap_err();
        let fields = err.fields.unwrap();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("nationalId"));
        assert!(!fields.contains_key("name"));
    }

    #[test]
    fn test_medication_requires_a_name() {
        let req = MedicationRequest {
            full_name: "  ".to_string(),
            short_name: None,
            dosage: None,
            form: None,
            photo_url: Some("ftp://example.com/photo.png".to_string()),
        };

        let err = validate_medication(&req).unwrap_err();
        assert!(err.fields.unwrap().contains_key("fullName"));
    }

    #[test]
    fn test_inventory_boundaries() {
        let ok = InventoryRequest {
            medication_id: uuid::Uuid::new_v4(),
            current_quantity: 0,
            alert_quantity: 1,
        };
        assert!(validate_inventory(&ok).is_ok());

        let bad = InventoryRequest {
            medication_id: uuid::Uuid::new_v4(),
            current_quantity: -1,
            alert_quantity: 0,
        };
        let fields = validate_inventory(&bad).unwrap_err().fields.unwrap();
        assert!(fields.contains_key("currentQuantity"));
        assert!(fields.contains_key("alertQuantity"));
    }

    #[test]
    fn test_reminder_weekday_range() {
        let req = ReminderRequest {
            medication_id: uuid::Uuid::new_v4(),
            times: vec![chrono::NaiveTime::from_hms_opt(8, 0, 0).unwrap()],
            weekdays: Some(vec![0, 6, 7]),
            dose_quantity: Some(1.0),
            instructions: None,
            active: true,
        };

        let fields = validate_reminder(&req).unwrap_err().fields.unwrap();
        assert!(fields.contains_key("weekdays"));
    }

    #[test]
    fn test_health_record_ranges() {
        let req = HealthRecordRequest {
            kind: MetricKind::BloodPressure,
            systolic: Some(40),
            diastolic: Some(250),
            pulse: Some(0),
            glucose_level: None,
            fasting: None,
            notes: None,
            recorded_at: None,
        };

        let fields = validate_health_record(&req).unwrap_err().fields.unwrap();
        assert!(fields.contains_key("systolic"));
        assert!(fields.contains_key("diastolic"));
        assert!(fields.contains_key("pulse"));
    }
}
