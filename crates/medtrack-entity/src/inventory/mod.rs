//! Personal inventory entity.

pub mod model;

pub use model::{CreateInventoryItem, InventoryItem, UpdateInventoryItem};
