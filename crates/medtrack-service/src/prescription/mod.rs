//! Prescription service.

pub mod service;

pub use service::{PrescriptionInput, PrescriptionItemInput, PrescriptionService};
