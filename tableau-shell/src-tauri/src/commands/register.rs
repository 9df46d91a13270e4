//! Register commands
//!
//! Cash amounts typed by the operator travel as raw strings; the server
//! does the parsing and reports missing input as a validation error.

use std::sync::Arc;
use rust_decimal::Decimal;
use tauri::State;
use tokio::sync::RwLock;

use crate::core::{ClientBridge, bridge_error};
use shared::ApiResponse;
use shared::request::{RegisterCloseRequest, RegisterOpenRequest, VarianceRequest};

#[tauri::command]
pub async fn register_status(
    bridge: State<'_, Arc<RwLock<ClientBridge>>>,
) -> Result<ApiResponse<serde_json::Value>, String> {
    let bridge = bridge.read().await;
    match bridge.get::<serde_json::Value>("/api/register").await {
        Ok(status) => Ok(ApiResponse::ok(status)),
        Err(e) => Ok(bridge_error(e)),
    }
}

#[tauri::command]
pub async fn open_register(
    bridge: State<'_, Arc<RwLock<ClientBridge>>>,
    opening_cash: String,
) -> Result<ApiResponse<serde_json::Value>, String> {
    let bridge = bridge.read().await;
    let payload = RegisterOpenRequest { opening_cash };
    match bridge
        .post::<serde_json::Value, _>("/api/register/open", &payload)
        .await
    {
        Ok(session) => Ok(ApiResponse::ok(session)),
        Err(e) => Ok(bridge_error(e)),
    }
}

#[tauri::command]
pub async fn compute_variance(
    bridge: State<'_, Arc<RwLock<ClientBridge>>>,
    actual_cash: String,
    cash_sales: Decimal,
) -> Result<ApiResponse<serde_json::Value>, String> {
    let bridge = bridge.read().await;
    let payload = VarianceRequest {
        actual_cash,
        cash_sales,
    };
    match bridge
        .post::<serde_json::Value, _>("/api/register/variance", &payload)
        .await
    {
        Ok(quote) => Ok(ApiResponse::ok(quote)),
        Err(e) => Ok(bridge_error(e)),
    }
}

#[tauri::command]
pub async fn close_register(
    bridge: State<'_, Arc<RwLock<ClientBridge>>>,
    total_sales: Decimal,
) -> Result<ApiResponse<serde_json::Value>, String> {
    let bridge = bridge.read().await;
    let payload = RegisterCloseRequest { total_sales };
    match bridge
        .post::<serde_json::Value, _>("/api/register/close", &payload)
        .await
    {
        Ok(entry) => Ok(ApiResponse::ok(entry)),
        Err(e) => Ok(bridge_error(e)),
    }
}

#[tauri::command]
pub async fn list_journals(
    bridge: State<'_, Arc<RwLock<ClientBridge>>>,
    start_date: Option<String>,
    end_date: Option<String>,
) -> Result<ApiResponse<serde_json::Value>, String> {
    let bridge = bridge.read().await;

    let path = match (start_date, end_date) {
        (Some(start), Some(end)) => {
            format!("/api/journals?start_date={start}&end_date={end}")
        }
        _ => "/api/journals".to_string(),
    };

    match bridge.get::<serde_json::Value>(&path).await {
        Ok(entries) => Ok(ApiResponse::ok(entries)),
        Err(e) => Ok(bridge_error(e)),
    }
}
