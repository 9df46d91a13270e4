//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::{Capability, CurrentUser};
use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::db::repository::ProductRepository;
use crate::utils::{AppError, AppResult};

const RESOURCE_PRODUCT: &str = "product";

/// Load a product and hide it unless it belongs to the caller's restaurant
async fn find_scoped(state: &ServerState, ctx: &CurrentUser, id: &str) -> AppResult<Product> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_id(id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound(format!("Product {id}")))?;
    if product.restaurant_name != ctx.restaurant_name {
        return Err(AppError::NotFound(format!("Product {id}")));
    }
    Ok(product)
}

/// GET /api/products - the caller's restaurant's products
pub async fn list(
    State(state): State<ServerState>,
    ctx: CurrentUser,
) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = repo
        .find_by_restaurant(&ctx.restaurant_name)
        .await
        .map_err(AppError::from)?;
    Ok(Json(products))
}

/// GET /api/products/:id - one product
pub async fn get_by_id(
    State(state): State<ServerState>,
    ctx: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let product = find_scoped(&state, &ctx, &id).await?;
    Ok(Json(product))
}

/// POST /api/products - create a product
pub async fn create(
    State(state): State<ServerState>,
    ctx: CurrentUser,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    ctx.require(Capability::CatalogManage)?;

    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .create(&ctx.restaurant_name, payload)
        .await
        .map_err(AppError::from)?;

    let id = product
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default();
    state.broadcast_sync(RESOURCE_PRODUCT, "created", &id, Some(&product));

    Ok(Json(product))
}

/// PUT /api/products/:id - update a product
pub async fn update(
    State(state): State<ServerState>,
    ctx: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    ctx.require(Capability::CatalogManage)?;
    find_scoped(&state, &ctx, &id).await?;

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.update(&id, payload).await.map_err(AppError::from)?;

    state.broadcast_sync(RESOURCE_PRODUCT, "updated", &id, Some(&product));

    Ok(Json(product))
}

/// DELETE /api/products/:id - delete a product
pub async fn delete(
    State(state): State<ServerState>,
    ctx: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    ctx.require(Capability::CatalogManage)?;
    find_scoped(&state, &ctx, &id).await?;

    let repo = ProductRepository::new(state.db.clone());
    repo.delete(&id).await.map_err(AppError::from)?;

    state.broadcast_sync::<()>(RESOURCE_PRODUCT, "deleted", &id, None);

    Ok(Json(true))
}
