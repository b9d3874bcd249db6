//! Prescription entity and its items.

pub mod model;

pub use model::{
    CreatePrescription, CreatePrescriptionItem, Prescription, PrescriptionItem,
    UpdatePrescription,
};
