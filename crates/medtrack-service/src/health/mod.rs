//! Health-record service.

pub mod service;

pub use service::{HealthRecordInput, HealthService};
