//! Journal API Handlers
//!
//! Read-only: the journal is append-only and the single writer is the
//! register manager's close path.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::{Capability, CurrentUser};
use crate::core::ServerState;
use crate::db::models::JournalEntry;
use crate::db::repository::JournalRepository;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct JournalQuery {
    /// Inclusive YYYY-MM-DD range bounds
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// GET /api/journals - the caller's restaurant's journal history
pub async fn list(
    State(state): State<ServerState>,
    ctx: CurrentUser,
    Query(query): Query<JournalQuery>,
) -> AppResult<Json<Vec<JournalEntry>>> {
    ctx.require(Capability::ReportsView)?;

    let repo = JournalRepository::new(state.db.clone());
    let entries = match (query.start_date, query.end_date) {
        (Some(start), Some(end)) => repo
            .find_by_date_range(&ctx.restaurant_name, &start, &end)
            .await
            .map_err(AppError::from)?,
        _ => repo
            .find_by_restaurant(&ctx.restaurant_name)
            .await
            .map_err(AppError::from)?,
    };

    Ok(Json(entries))
}

/// GET /api/journals/:id - one entry
pub async fn get_by_id(
    State(state): State<ServerState>,
    ctx: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<JournalEntry>> {
    ctx.require(Capability::ReportsView)?;

    let repo = JournalRepository::new(state.db.clone());
    let entry = repo
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound(format!("Journal entry {id}")))?;

    if entry.restaurant_name != ctx.restaurant_name {
        return Err(AppError::NotFound(format!("Journal entry {id}")));
    }

    Ok(Json(entry))
}
