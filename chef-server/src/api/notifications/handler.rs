//! Notification API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Notification;
use crate::db::repository::NotificationRepository;
use crate::utils::{AppError, AppResult};

const RESOURCE_NOTIFICATION: &str = "notification";

#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    #[serde(default)]
    pub unread: bool,
}

/// GET /api/notifications - the caller's restaurant's notifications
pub async fn list(
    State(state): State<ServerState>,
    ctx: CurrentUser,
    Query(query): Query<NotificationQuery>,
) -> AppResult<Json<Vec<Notification>>> {
    let repo = NotificationRepository::new(state.db.clone());
    let notifications = repo
        .find_by_restaurant(&ctx.restaurant_name, query.unread)
        .await
        .map_err(AppError::from)?;
    Ok(Json(notifications))
}

/// PUT /api/notifications/:id/read - mark one notification as read
pub async fn mark_read(
    State(state): State<ServerState>,
    ctx: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Notification>> {
    let repo = NotificationRepository::new(state.db.clone());

    // Scope check before mutating
    let notification = repo
        .find_by_restaurant(&ctx.restaurant_name, false)
        .await
        .map_err(AppError::from)?
        .into_iter()
        .find(|n| n.id.as_ref().map(|i| i.to_string()) == Some(id.clone()))
        .ok_or_else(|| AppError::NotFound(format!("Notification {id}")))?;

    let id_string = notification
        .id
        .as_ref()
        .map(|i| i.to_string())
        .unwrap_or_default();
    let updated = repo.mark_read(&id_string).await.map_err(AppError::from)?;

    state.broadcast_sync(RESOURCE_NOTIFICATION, "updated", &id_string, Some(&updated));

    Ok(Json(updated))
}
