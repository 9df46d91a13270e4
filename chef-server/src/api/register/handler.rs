//! Register API Handlers
//!
//! Thin HTTP adapters over [`RegisterManager`]; the lifecycle rules live
//! there, not here.

use axum::{Json, extract::State};
use serde::Serialize;
use shared::request::{RegisterCloseRequest, RegisterOpenRequest, VarianceRequest};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{JournalEntry, RegisterSession, VarianceQuote};
use crate::utils::AppResult;

const RESOURCE_REGISTER: &str = "register";
const RESOURCE_JOURNAL: &str = "journal";

#[derive(Debug, Serialize)]
pub struct RegisterStatusResponse {
    pub session: RegisterSession,
    /// Last computed variance of the current open period, if any
    pub last_variance: Option<VarianceQuote>,
}

/// GET /api/register - drawer state of the caller's restaurant
pub async fn status(
    State(state): State<ServerState>,
    ctx: CurrentUser,
) -> AppResult<Json<RegisterStatusResponse>> {
    let session = state.registers.current(&ctx).await?;
    let last_variance = state.registers.last_quote(&ctx);
    Ok(Json(RegisterStatusResponse {
        session,
        last_variance,
    }))
}

/// POST /api/register/open - open the drawer with the declared float
pub async fn open(
    State(state): State<ServerState>,
    ctx: CurrentUser,
    Json(payload): Json<RegisterOpenRequest>,
) -> AppResult<Json<RegisterSession>> {
    let session = state.registers.open(&ctx, &payload.opening_cash).await?;

    state.broadcast_sync(
        RESOURCE_REGISTER,
        "updated",
        &ctx.restaurant_name,
        Some(&session),
    );

    Ok(Json(session))
}

/// POST /api/register/variance - compute the cash variance
///
/// Pure with respect to the session; may be called any number of times
/// while the drawer is open.
pub async fn variance(
    State(state): State<ServerState>,
    ctx: CurrentUser,
    Json(payload): Json<VarianceRequest>,
) -> AppResult<Json<VarianceQuote>> {
    let quote = state
        .registers
        .compute_variance(&ctx, &payload.actual_cash, payload.cash_sales)
        .await?;
    Ok(Json(quote))
}

/// POST /api/register/close - close the drawer and write the journal entry
pub async fn close(
    State(state): State<ServerState>,
    ctx: CurrentUser,
    Json(payload): Json<RegisterCloseRequest>,
) -> AppResult<Json<JournalEntry>> {
    let entry = state.registers.close(&ctx, payload.total_sales).await?;

    let entry_id = entry.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE_JOURNAL, "created", &entry_id, Some(&entry));
    state.broadcast_sync::<()>(RESOURCE_REGISTER, "updated", &ctx.restaurant_name, None);

    Ok(Json(entry))
}
