//! # medtrack-service
//!
//! Business logic for MedTrack. Each resource service exposes owner-scoped
//! CRUD plus its domain queries; every operation takes the caller's
//! [`context::RequestContext`] explicitly. An ownership mismatch is always
//! reported as not-found, never as a distinct forbidden signal.

pub mod context;
pub mod health;
pub mod inventory;
pub mod medication;
pub mod prescription;
pub mod reminder;
pub mod user;
