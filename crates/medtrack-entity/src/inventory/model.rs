//! Personal inventory entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user's stock of one medication.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InventoryItem {
    /// Unique inventory item identifier.
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
    /// The stocked medication.
    pub medication_id: Uuid,
    /// Units currently on hand.
    pub current_quantity: i32,
    /// Threshold at or below which the stock counts as low.
    pub alert_quantity: i32,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Check whether the stock is low: current quantity at or below the
    /// alert threshold.
    pub fn is_low_stock(&self) -> bool {
        self.current_quantity <= self.alert_quantity
    }
}

/// Data required to create a new inventory item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInventoryItem {
    /// The owning user.
    pub user_id: Uuid,
    /// The stocked medication.
    pub medication_id: Uuid,
    /// Initial quantity on hand.
    pub current_quantity: i32,
    /// Alert threshold.
    pub alert_quantity: i32,
}

/// Data for updating an existing inventory item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateInventoryItem {
    /// The inventory item ID to update.
    pub id: Uuid,
    /// New medication reference.
    pub medication_id: Uuid,
    /// New quantity on hand.
    pub current_quantity: i32,
    /// New alert threshold.
    pub alert_quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(current: i32, alert: i32) -> InventoryItem {
        InventoryItem {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            medication_id: Uuid::new_v4(),
            current_quantity: current,
            alert_quantity: alert,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_below_threshold_is_low() {
        assert!(item(2, 5).is_low_stock());
    }

    #[test]
    fn test_equal_to_threshold_is_low() {
        assert!(item(5, 5).is_low_stock());
    }

    #[test]
    fn test_above_threshold_is_not_low() {
        assert!(!item(6, 5).is_low_stock());
    }
}
