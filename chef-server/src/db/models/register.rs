//! Register Session Model
//!
//! One document per restaurant in the `register_sessions` collection,
//! holding the open/closed state of the cash drawer. At most one drawer
//! can be open per restaurant; the session fields are cleared again on
//! close, so a closed session looks exactly like a never-opened one.

use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub type RegisterSessionId = RecordId;

/// Register session entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterSession {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RegisterSessionId>,

    /// Tenant grouping key
    pub restaurant_name: String,

    /// Drawer state
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_open: bool,

    /// Display name of the operator who opened the drawer
    pub opened_by: Option<String>,

    /// Open time (Unix timestamp millis)
    pub open_time: Option<i64>,

    /// Declared opening float; fixed for the whole session
    pub opening_cash: Option<Decimal>,
}

impl RegisterSession {
    /// A drawer that has never been opened (or was closed and cleared).
    pub fn closed(restaurant_name: impl Into<String>) -> Self {
        Self {
            id: None,
            restaurant_name: restaurant_name.into(),
            is_open: false,
            opened_by: None,
            open_time: None,
            opening_cash: None,
        }
    }
}

/// Variance quote: the last computed cash variance for an open drawer.
///
/// Transient — kept in memory by the register manager, never persisted.
/// Recomputing replaces the previous quote; closing the drawer consumes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VarianceQuote {
    /// Physically counted cash
    pub actual_cash: Decimal,
    /// Cash-sales figure the quote was computed against
    pub cash_sales: Decimal,
    /// cash_sales + opening_cash
    pub expected_cash: Decimal,
    /// actual_cash - expected_cash (negative = shortage)
    pub variance: Decimal,
    /// Computation time (Unix timestamp millis)
    pub computed_at: i64,
}
