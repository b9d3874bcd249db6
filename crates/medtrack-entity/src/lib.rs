//! # medtrack-entity
//!
//! Domain entity models for MedTrack: users, refresh tokens, medications,
//! prescriptions, personal inventory, reminders, and health records.
//!
//! Every entity is a `sqlx::FromRow` struct mirroring one table, paired
//! with `Create*`/`Update*` payload structs used by the repositories.

pub mod health;
pub mod inventory;
pub mod medication;
pub mod prescription;
pub mod reminder;
pub mod token;
pub mod user;
