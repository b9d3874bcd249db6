//! Medication service.

pub mod service;

pub use service::{MedicationInput, MedicationService};
