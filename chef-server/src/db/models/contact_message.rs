//! Contact Message Model
//!
//! Messages submitted through the marketing site's contact form.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub type ContactMessageId = RecordId;

/// Contact message entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<ContactMessageId>,

    pub name: String,
    pub email: String,
    pub message: String,

    /// Creation time (Unix timestamp millis)
    pub created_at: i64,
}

/// Create contact message payload (public endpoint)
#[derive(Debug, Clone, Serialize, Deserialize, validator::Validate)]
pub struct ContactMessageCreate {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub message: String,
}
