//! Tauri commands for the TableauChef shell

pub mod auth;
pub mod register;
pub mod stock;
pub mod window;

pub use auth::*;
pub use register::*;
pub use stock::*;
pub use window::*;
