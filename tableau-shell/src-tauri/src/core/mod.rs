//! Shell core: the bridge to the chef-server

pub mod client_bridge;

pub use client_bridge::{BridgeError, ClientBridge};

use shared::ApiResponse;

/// Map a bridge failure into the shell's response envelope
pub fn bridge_error<T>(e: BridgeError) -> ApiResponse<T> {
    ApiResponse::error(e.code(), e.to_string())
}
