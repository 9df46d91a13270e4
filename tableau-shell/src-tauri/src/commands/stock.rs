//! Inventory and stock commands

use std::sync::Arc;
use rust_decimal::Decimal;
use tauri::State;
use tokio::sync::RwLock;

use crate::core::{ClientBridge, bridge_error};
use shared::ApiResponse;
use shared::request::{StockAmountRequest, StockRecountRequest};

#[tauri::command]
pub async fn list_inventory(
    bridge: State<'_, Arc<RwLock<ClientBridge>>>,
) -> Result<ApiResponse<serde_json::Value>, String> {
    let bridge = bridge.read().await;
    match bridge.get::<serde_json::Value>("/api/inventory").await {
        Ok(items) => Ok(ApiResponse::ok(items)),
        Err(e) => Ok(bridge_error(e)),
    }
}

#[tauri::command]
pub async fn restock_item(
    bridge: State<'_, Arc<RwLock<ClientBridge>>>,
    id: String,
    amount: Decimal,
) -> Result<ApiResponse<serde_json::Value>, String> {
    let bridge = bridge.read().await;
    let payload = StockAmountRequest { amount };
    match bridge
        .post::<serde_json::Value, _>(&format!("/api/inventory/{id}/restock"), &payload)
        .await
    {
        Ok(outcome) => Ok(ApiResponse::ok(outcome)),
        Err(e) => Ok(bridge_error(e)),
    }
}

#[tauri::command]
pub async fn consume_item(
    bridge: State<'_, Arc<RwLock<ClientBridge>>>,
    id: String,
    amount: Decimal,
) -> Result<ApiResponse<serde_json::Value>, String> {
    let bridge = bridge.read().await;
    let payload = StockAmountRequest { amount };
    match bridge
        .post::<serde_json::Value, _>(&format!("/api/inventory/{id}/consume"), &payload)
        .await
    {
        Ok(outcome) => Ok(ApiResponse::ok(outcome)),
        Err(e) => Ok(bridge_error(e)),
    }
}

#[tauri::command]
pub async fn recount_item(
    bridge: State<'_, Arc<RwLock<ClientBridge>>>,
    id: String,
    new_total: Decimal,
) -> Result<ApiResponse<serde_json::Value>, String> {
    let bridge = bridge.read().await;
    let payload = StockRecountRequest { new_total };
    match bridge
        .post::<serde_json::Value, _>(&format!("/api/inventory/{id}/recount"), &payload)
        .await
    {
        Ok(outcome) => Ok(ApiResponse::ok(outcome)),
        Err(e) => Ok(bridge_error(e)),
    }
}

#[tauri::command]
pub async fn list_notifications(
    bridge: State<'_, Arc<RwLock<ClientBridge>>>,
    unread: Option<bool>,
) -> Result<ApiResponse<serde_json::Value>, String> {
    let bridge = bridge.read().await;
    let path = if unread.unwrap_or(false) {
        "/api/notifications?unread=true"
    } else {
        "/api/notifications"
    };
    match bridge.get::<serde_json::Value>(path).await {
        Ok(notifications) => Ok(ApiResponse::ok(notifications)),
        Err(e) => Ok(bridge_error(e)),
    }
}

#[tauri::command]
pub async fn mark_notification_read(
    bridge: State<'_, Arc<RwLock<ClientBridge>>>,
    id: String,
) -> Result<ApiResponse<serde_json::Value>, String> {
    let bridge = bridge.read().await;
    match bridge
        .put::<serde_json::Value, _>(&format!("/api/notifications/{id}/read"), &())
        .await
    {
        Ok(notification) => Ok(ApiResponse::ok(notification)),
        Err(e) => Ok(bridge_error(e)),
    }
}
