//! Request payloads
//!
//! Wire types sent by the desktop shell (and any other client) to the
//! server. Cash amounts typed by an operator travel as raw strings and
//! are parsed server-side, so that a missing or garbled input is
//! reported as a validation error rather than a deserialization failure.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==================== Auth ====================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ==================== Register Session ====================

/// Open the cash drawer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterOpenRequest {
    /// Declared opening float, as typed by the operator.
    pub opening_cash: String,
}

/// Compute the cash variance for the currently open drawer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarianceRequest {
    /// Physically counted cash, as typed by the operator.
    pub actual_cash: String,
    /// Cash-sales total for the day, supplied by the sales aggregation.
    pub cash_sales: Decimal,
}

/// Close the drawer and write the day's journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterCloseRequest {
    /// Total sales figure for the day, supplied by the sales aggregation.
    pub total_sales: Decimal,
}

// ==================== Stock ====================

/// Delta mutation payload (restock / consume).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAmountRequest {
    pub amount: Decimal,
}

/// Absolute overwrite after a physical count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockRecountRequest {
    pub new_total: Decimal,
}

// ==================== Tenant administration ====================

/// Enable or disable every account of one restaurant in a single batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantStatusRequest {
    pub enabled: bool,
}
