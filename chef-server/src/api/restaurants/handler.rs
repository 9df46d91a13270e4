//! Restaurant API Handlers
//!
//! Platform administration over the emergent restaurant grouping.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::request::RestaurantStatusRequest;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::tenants::RestaurantDirectory;
use crate::utils::AppResult;

const RESOURCE_USER: &str = "user";

/// GET /api/restaurants - the per-restaurant staff directory
pub async fn directory(
    State(state): State<ServerState>,
    ctx: CurrentUser,
) -> AppResult<Json<Vec<RestaurantDirectory>>> {
    let directory = state.tenants.directory(&ctx).await?;
    Ok(Json(directory))
}

#[derive(Debug, Serialize)]
pub struct StatusToggleResponse {
    pub restaurant_name: String,
    pub enabled: bool,
    pub accounts_updated: usize,
}

/// PUT /api/restaurants/:name/status - enable/disable a whole restaurant
///
/// Applies to every account of the restaurant as one atomic batch.
pub async fn set_status(
    State(state): State<ServerState>,
    ctx: CurrentUser,
    Path(name): Path<String>,
    Json(payload): Json<RestaurantStatusRequest>,
) -> AppResult<Json<StatusToggleResponse>> {
    let accounts_updated = state
        .tenants
        .set_restaurant_status(&ctx, &name, payload.enabled)
        .await?;

    state.broadcast_sync::<()>(RESOURCE_USER, "updated", &name, None);

    Ok(Json(StatusToggleResponse {
        restaurant_name: name,
        enabled: payload.enabled,
        accounts_updated,
    }))
}
