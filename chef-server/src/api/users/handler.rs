//! User API Handlers
//!
//! Account creation goes through the provisioning backend so the
//! single-session side effect stays behind its seam.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::auth::{Capability, CurrentUser};
use crate::core::ServerState;
use crate::db::models::{Role, UserCreate, UserProfile, UserUpdate};
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

const RESOURCE_USER: &str = "user";

/// Load a profile and hide it unless the caller may manage it
async fn find_managed(state: &ServerState, ctx: &CurrentUser, id: &str) -> AppResult<UserProfile> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_id(id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound(format!("User {id}")))?;

    if !matches!(ctx.role, Role::SuperAdmin) && user.restaurant_name != ctx.restaurant_name {
        return Err(AppError::NotFound(format!("User {id}")));
    }
    Ok(user)
}

/// GET /api/users - accounts the caller may manage
pub async fn list(
    State(state): State<ServerState>,
    ctx: CurrentUser,
) -> AppResult<Json<Vec<UserProfile>>> {
    ctx.require(Capability::UsersManage)?;

    let repo = UserRepository::new(state.db.clone());
    let users = if matches!(ctx.role, Role::SuperAdmin) {
        repo.find_all().await.map_err(AppError::from)?
    } else {
        repo.find_by_restaurant(&ctx.restaurant_name)
            .await
            .map_err(AppError::from)?
    };
    Ok(Json(users))
}

/// GET /api/users/:id - one account
pub async fn get_by_id(
    State(state): State<ServerState>,
    ctx: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<UserProfile>> {
    ctx.require(Capability::UsersManage)?;
    let user = find_managed(&state, &ctx, &id).await?;
    Ok(Json(user))
}

#[derive(Debug, Serialize)]
pub struct UserProvisionResponse {
    pub user: UserProfile,
    /// The caller's own session was dropped by the provisioning flow and
    /// a fresh login is required
    pub actor_session_invalidated: bool,
}

/// POST /api/users - provision a new account
pub async fn create(
    State(state): State<ServerState>,
    ctx: CurrentUser,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<UserProvisionResponse>> {
    let outcome = state.provisioning.create_account(&ctx, payload).await?;

    let id = outcome
        .user
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default();
    state.broadcast_sync(RESOURCE_USER, "created", &id, Some(&outcome.user));

    Ok(Json(UserProvisionResponse {
        user: outcome.user,
        actor_session_invalidated: outcome.actor_session_invalidated,
    }))
}

/// PUT /api/users/:id - update an account
pub async fn update(
    State(state): State<ServerState>,
    ctx: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<UserProfile>> {
    ctx.require(Capability::UsersManage)?;
    find_managed(&state, &ctx, &id).await?;

    // Only the platform admin may hand out elevated roles
    if let Some(role) = payload.role
        && !matches!(ctx.role, Role::SuperAdmin)
        && matches!(role, Role::SuperAdmin)
    {
        return Err(AppError::Forbidden(
            "Cannot grant the Super Admin role".to_string(),
        ));
    }

    let repo = UserRepository::new(state.db.clone());
    let user = repo.update(&id, payload).await.map_err(AppError::from)?;

    state.broadcast_sync(RESOURCE_USER, "updated", &id, Some(&user));

    Ok(Json(user))
}

/// DELETE /api/users/:id - delete an account
pub async fn delete(
    State(state): State<ServerState>,
    ctx: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    ctx.require(Capability::UsersManage)?;
    let target = find_managed(&state, &ctx, &id).await?;

    if target.id.as_ref().map(|i| i.to_string()) == Some(ctx.id.clone()) {
        return Err(AppError::Validation(
            "Cannot delete your own account".to_string(),
        ));
    }

    let repo = UserRepository::new(state.db.clone());
    repo.delete(&id).await.map_err(AppError::from)?;

    state.broadcast_sync::<()>(RESOURCE_USER, "deleted", &id, None);

    Ok(Json(true))
}
