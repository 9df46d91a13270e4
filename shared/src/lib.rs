//! Shared types for TableauChef
//!
//! Common types used by both the back-office server and the desktop
//! shell: request payloads, the unified API response envelope, and
//! small time utilities.

pub mod request;
pub mod response;
pub mod util;

// Re-exports
pub use request::*;
pub use response::ApiResponse;
pub use serde::{Deserialize, Serialize};
