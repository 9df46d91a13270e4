//! Contact Message API Handlers
//!
//! The POST endpoint backs the marketing site's contact form and is the
//! only unauthenticated write in the API.

use axum::{Json, extract::State};
use validator::Validate;

use crate::auth::{Capability, CurrentUser};
use crate::core::ServerState;
use crate::db::models::{ContactMessage, ContactMessageCreate};
use crate::db::repository::ContactMessageRepository;
use crate::utils::{AppError, AppResult};

/// POST /api/contact-messages - submit a contact message (public)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ContactMessageCreate>,
) -> AppResult<Json<ContactMessage>> {
    payload.validate()?;

    let repo = ContactMessageRepository::new(state.db.clone());
    let message = repo.create(payload).await.map_err(AppError::from)?;

    tracing::info!(from = %message.email, "Contact message received");

    Ok(Json(message))
}

/// GET /api/contact-messages - the contact inbox
pub async fn list(
    State(state): State<ServerState>,
    ctx: CurrentUser,
) -> AppResult<Json<Vec<ContactMessage>>> {
    ctx.require(Capability::ContactInboxView)?;

    let repo = ContactMessageRepository::new(state.db.clone());
    let messages = repo.find_all().await.map_err(AppError::from)?;
    Ok(Json(messages))
}
