//! Database models
//!
//! Document shapes for the persisted collections: `users`, `inventory`,
//! `products`, `journals`, `notifications`, `contact_messages` and
//! `register_sessions`.

pub mod contact_message;
pub mod inventory;
pub mod journal;
pub mod notification;
pub mod product;
pub mod register;
pub mod serde_helpers;
pub mod user;

// Re-exports
pub use contact_message::*;
pub use inventory::*;
pub use journal::*;
pub use notification::*;
pub use product::*;
pub use register::*;
pub use user::*;
