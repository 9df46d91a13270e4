//! Journal Entry Model
//!
//! Append-only `journals` collection: one entry per completed register
//! session. Entries are never updated or deleted.

use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub type JournalEntryId = RecordId;

/// Daily cash-register journal entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<JournalEntryId>,

    /// Tenant grouping key
    pub restaurant_name: String,

    /// Calendar day (YYYY-MM-DD)
    pub date: String,

    /// Day's total sales, supplied by the sales aggregation
    pub total_sales: Decimal,

    /// Opening float copied from the session at close time
    pub opening_cash: Decimal,

    /// actual_cash_counted - (cash_sales + opening_cash)
    pub variance: Decimal,

    /// Display name of the operator who closed the drawer
    pub closed_by: String,

    /// Creation time (Unix timestamp millis)
    pub created_at: i64,
}
