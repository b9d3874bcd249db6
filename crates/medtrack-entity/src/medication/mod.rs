//! Medication entity.

pub mod model;

pub use model::{CreateMedication, Medication, UpdateMedication};
