//! Dosage reminder service.

pub mod service;

pub use service::{ReminderInput, ReminderService};
