//! Auth API Handlers

use axum::{Json, extract::State};
use serde::Serialize;
use shared::request::LoginRequest;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{UserProfile, UserStatus};
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

/// POST /api/auth/login - exchange credentials for a token
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_email(&payload.email)
        .await
        .map_err(AppError::from)?
        .ok_or_else(AppError::invalid_credentials)?;

    if user.status == UserStatus::Disabled {
        return Err(AppError::Forbidden("Account is disabled".to_string()));
    }

    let valid = user
        .verify_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {e}")))?;
    if !valid {
        tracing::warn!(email = %payload.email, "Failed login attempt");
        return Err(AppError::invalid_credentials());
    }

    let token = state.jwt_service.issue(&user)?;
    tracing::info!(email = %user.email, role = %user.role, "User logged in");

    Ok(Json(LoginResponse { token, user }))
}

/// GET /api/auth/me - profile behind the presented token
pub async fn me(
    State(state): State<ServerState>,
    ctx: CurrentUser,
) -> AppResult<Json<UserProfile>> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_id(&ctx.id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound(format!("User {}", ctx.id)))?;
    Ok(Json(user))
}
