//! Dosage reminder entity.

pub mod model;

pub use model::{CreateReminder, Reminder, UpdateReminder};
