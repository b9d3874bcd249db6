//! Health-record entity.

pub mod kind;
pub mod model;

pub use kind::MetricKind;
pub use model::{CreateHealthRecord, HealthRecord, UpdateHealthRecord};
