//! Inventory API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::request::{StockAmountRequest, StockRecountRequest};

use crate::auth::{Capability, CurrentUser};
use crate::core::ServerState;
use crate::db::models::{InventoryItem, InventoryItemCreate, InventoryItemUpdate, Notification};
use crate::db::repository::InventoryRepository;
use crate::stock::StockMutation;
use crate::utils::{AppError, AppResult};

const RESOURCE_INVENTORY: &str = "inventory";
const RESOURCE_NOTIFICATION: &str = "notification";

/// Load an item and hide it unless it belongs to the caller's restaurant
async fn find_scoped(
    state: &ServerState,
    ctx: &CurrentUser,
    id: &str,
) -> AppResult<InventoryItem> {
    let repo = InventoryRepository::new(state.db.clone());
    let item = repo
        .find_by_id(id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound(format!("Inventory item {id}")))?;
    if item.restaurant_name != ctx.restaurant_name {
        return Err(AppError::NotFound(format!("Inventory item {id}")));
    }
    Ok(item)
}

/// GET /api/inventory - the caller's restaurant's items
pub async fn list(
    State(state): State<ServerState>,
    ctx: CurrentUser,
) -> AppResult<Json<Vec<InventoryItem>>> {
    let repo = InventoryRepository::new(state.db.clone());
    let items = repo
        .find_by_restaurant(&ctx.restaurant_name)
        .await
        .map_err(AppError::from)?;
    Ok(Json(items))
}

/// GET /api/inventory/:id - one item
pub async fn get_by_id(
    State(state): State<ServerState>,
    ctx: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<InventoryItem>> {
    let item = find_scoped(&state, &ctx, &id).await?;
    Ok(Json(item))
}

/// POST /api/inventory - create an item
pub async fn create(
    State(state): State<ServerState>,
    ctx: CurrentUser,
    Json(payload): Json<InventoryItemCreate>,
) -> AppResult<Json<InventoryItem>> {
    ctx.require(Capability::StockManage)?;

    let repo = InventoryRepository::new(state.db.clone());
    let item = repo
        .create(&ctx.restaurant_name, payload)
        .await
        .map_err(AppError::from)?;

    let id = item.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE_INVENTORY, "created", &id, Some(&item));

    Ok(Json(item))
}

/// PUT /api/inventory/:id - update item metadata
pub async fn update(
    State(state): State<ServerState>,
    ctx: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<InventoryItemUpdate>,
) -> AppResult<Json<InventoryItem>> {
    ctx.require(Capability::StockManage)?;
    find_scoped(&state, &ctx, &id).await?;

    let repo = InventoryRepository::new(state.db.clone());
    let item = repo.update(&id, payload).await.map_err(AppError::from)?;

    state.broadcast_sync(RESOURCE_INVENTORY, "updated", &id, Some(&item));

    Ok(Json(item))
}

/// DELETE /api/inventory/:id - delete an item
pub async fn delete(
    State(state): State<ServerState>,
    ctx: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    ctx.require(Capability::StockManage)?;
    find_scoped(&state, &ctx, &id).await?;

    let repo = InventoryRepository::new(state.db.clone());
    repo.delete(&id).await.map_err(AppError::from)?;

    state.broadcast_sync::<()>(RESOURCE_INVENTORY, "deleted", &id, None);

    Ok(Json(true))
}

// =============================================================================
// Stock mutations
// =============================================================================

#[derive(Debug, Serialize)]
pub struct StockMutationResponse {
    pub item: InventoryItem,
    /// The low-stock notification fired by this mutation, if any
    pub notification: Option<Notification>,
}

async fn apply_and_broadcast(
    state: ServerState,
    ctx: CurrentUser,
    id: String,
    mutation: StockMutation,
) -> AppResult<Json<StockMutationResponse>> {
    let outcome = state.stock.apply_mutation(&ctx, &id, mutation).await?;

    state.broadcast_sync(RESOURCE_INVENTORY, "updated", &id, Some(&outcome.item));
    if let Some(ref notification) = outcome.notification {
        let notification_id = notification
            .id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_default();
        state.broadcast_sync(
            RESOURCE_NOTIFICATION,
            "created",
            &notification_id,
            Some(notification),
        );
    }

    Ok(Json(StockMutationResponse {
        item: outcome.item,
        notification: outcome.notification,
    }))
}

/// POST /api/inventory/:id/restock - add to stock
pub async fn restock(
    State(state): State<ServerState>,
    ctx: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<StockAmountRequest>,
) -> AppResult<Json<StockMutationResponse>> {
    apply_and_broadcast(state, ctx, id, StockMutation::Restock(payload.amount)).await
}

/// POST /api/inventory/:id/consume - take from stock
pub async fn consume(
    State(state): State<ServerState>,
    ctx: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<StockAmountRequest>,
) -> AppResult<Json<StockMutationResponse>> {
    apply_and_broadcast(state, ctx, id, StockMutation::Consume(payload.amount)).await
}

/// POST /api/inventory/:id/recount - absolute overwrite after a physical count
pub async fn recount(
    State(state): State<ServerState>,
    ctx: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<StockRecountRequest>,
) -> AppResult<Json<StockMutationResponse>> {
    apply_and_broadcast(state, ctx, id, StockMutation::PhysicalCount(payload.new_total)).await
}
