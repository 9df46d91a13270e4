//! Inventory Item Model

use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub type InventoryItemId = RecordId;

/// Inventory item matching the `inventory` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<InventoryItemId>,

    /// Tenant grouping key
    pub restaurant_name: String,

    pub name: String,
    pub category: String,

    /// Unit of measure ("kg", "L", "pcs", ...)
    pub unit: String,

    /// Quantity on hand; never negative after any mutation
    pub stock: Decimal,

    /// Capacity reference for the low-stock ratio and display
    pub max_stock: Decimal,

    /// Alert fraction in (0, 1]; `None` falls back to 0.2
    pub low_stock_threshold: Option<Decimal>,

    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

/// Create inventory item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemCreate {
    pub name: String,
    pub category: String,
    pub unit: String,
    #[serde(default)]
    pub stock: Decimal,
    pub max_stock: Decimal,
    pub low_stock_threshold: Option<Decimal>,
}

/// Update inventory item payload (metadata only; `stock` moves through
/// the stock ledger, not through plain updates)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_stock: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_stock_threshold: Option<Decimal>,
}
