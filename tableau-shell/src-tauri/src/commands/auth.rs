//! Auth commands
//!
//! Login stores the bearer token on the bridge; every later command
//! rides on it.

use std::sync::Arc;
use tauri::State;
use tokio::sync::RwLock;

use crate::core::{ClientBridge, bridge_error};
use shared::ApiResponse;
use shared::request::LoginRequest;

#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct LoginData {
    pub token: String,
    pub user: serde_json::Value,
}

#[tauri::command]
pub async fn login(
    bridge: State<'_, Arc<RwLock<ClientBridge>>>,
    email: String,
    password: String,
) -> Result<ApiResponse<serde_json::Value>, String> {
    let payload = LoginRequest { email, password };

    let result = {
        let bridge = bridge.read().await;
        bridge
            .post::<LoginData, _>("/api/auth/login", &payload)
            .await
    };

    match result {
        Ok(data) => {
            bridge.write().await.set_token(Some(data.token));
            Ok(ApiResponse::ok(data.user))
        }
        Err(e) => Ok(bridge_error(e)),
    }
}

#[tauri::command]
pub async fn logout(
    bridge: State<'_, Arc<RwLock<ClientBridge>>>,
) -> Result<ApiResponse<bool>, String> {
    bridge.write().await.set_token(None);
    Ok(ApiResponse::ok(true))
}

#[tauri::command]
pub async fn current_user(
    bridge: State<'_, Arc<RwLock<ClientBridge>>>,
) -> Result<ApiResponse<serde_json::Value>, String> {
    let bridge = bridge.read().await;
    match bridge.get::<serde_json::Value>("/api/auth/me").await {
        Ok(user) => Ok(ApiResponse::ok(user)),
        Err(e) => Ok(bridge_error(e)),
    }
}
