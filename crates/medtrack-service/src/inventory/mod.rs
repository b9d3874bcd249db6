//! Personal inventory service.

pub mod service;

pub use service::{InventoryInput, InventoryService};
