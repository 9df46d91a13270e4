//! Notification Model
//!
//! Append-only `notifications` collection. The only mutation ever issued
//! against an existing notification is flipping `is_read`.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub type NotificationId = RecordId;

/// Notification category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Low-stock alert
    Stock,
    /// Anything else
    System,
}

/// Notification entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<NotificationId>,

    /// Tenant grouping key
    pub restaurant_name: String,

    pub message: String,
    pub kind: NotificationKind,

    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_read: bool,

    /// Creation time (Unix timestamp millis)
    pub created_at: i64,
}
