//! Stock Ledger
//!
//! Applies the three inventory mutations (restock, consume, physical
//! recount) and fires the low-stock notification on the downward
//! threshold edge. The arithmetic and the edge detection live in
//! [`transition`], a pure function; [`StockService`] wires it to
//! persistence and notification append.

#[cfg(test)]
mod tests;

use rust_decimal::Decimal;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use crate::auth::{Capability, CurrentUser};
use crate::db::models::{InventoryItem, Notification, NotificationKind};
use crate::db::repository::{InventoryRepository, NotificationRepository};
use crate::utils::{AppError, AppResult};

/// Alert fraction used when an item carries no explicit threshold
pub fn default_low_stock_threshold() -> Decimal {
    // 0.2
    Decimal::new(2, 1)
}

/// One stock mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockMutation {
    /// stock' = stock + amount
    Restock(Decimal),
    /// stock' = stock - amount
    Consume(Decimal),
    /// stock' = new_total (absolute overwrite, not a delta)
    PhysicalCount(Decimal),
}

/// Errors from the pure transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StockError {
    #[error("Mutation amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("Mutation would drive stock to {attempted}")]
    NegativeStockRejected { attempted: Decimal },
}

impl From<StockError> for AppError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::NonPositiveAmount(_) => AppError::Validation(err.to_string()),
            StockError::NegativeStockRejected { .. } => AppError::NegativeStock(err.to_string()),
        }
    }
}

/// Result of a successful transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockTransition {
    pub new_stock: Decimal,
    /// Stock crossed from above the alert threshold to at-or-below it.
    /// Edge-triggered: staying below does not re-fire.
    pub low_stock_alert: bool,
}

/// Apply a mutation to a stock level.
///
/// Rejects any mutation that would leave the stock negative; the caller
/// must not persist anything in that case.
pub fn transition(
    previous_stock: Decimal,
    max_stock: Decimal,
    low_stock_threshold: Option<Decimal>,
    mutation: StockMutation,
) -> Result<StockTransition, StockError> {
    let new_stock = match mutation {
        StockMutation::Restock(amount) => {
            if amount <= Decimal::ZERO {
                return Err(StockError::NonPositiveAmount(amount));
            }
            previous_stock + amount
        }
        StockMutation::Consume(amount) => {
            if amount <= Decimal::ZERO {
                return Err(StockError::NonPositiveAmount(amount));
            }
            previous_stock - amount
        }
        StockMutation::PhysicalCount(new_total) => new_total,
    };

    if new_stock < Decimal::ZERO {
        return Err(StockError::NegativeStockRejected {
            attempted: new_stock,
        });
    }

    let threshold = max_stock * low_stock_threshold.unwrap_or_else(default_low_stock_threshold);
    let low_stock_alert = new_stock <= threshold && previous_stock > threshold;

    Ok(StockTransition {
        new_stock,
        low_stock_alert,
    })
}

/// Outcome of a persisted mutation
#[derive(Debug)]
pub struct StockUpdateOutcome {
    pub item: InventoryItem,
    /// The low-stock notification fired by this mutation, if any
    pub notification: Option<Notification>,
}

/// Stock ledger service
#[derive(Clone)]
pub struct StockService {
    db: Surreal<Db>,
}

impl StockService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    /// Apply one mutation to an item and persist the result.
    ///
    /// The stock write and the notification append are two separate
    /// writes; a crash in between leaves the stock updated with no alert
    /// fired (accepted as a best-effort pair).
    pub async fn apply_mutation(
        &self,
        ctx: &CurrentUser,
        item_id: &str,
        mutation: StockMutation,
    ) -> AppResult<StockUpdateOutcome> {
        ctx.require(Capability::StockManage)?;

        let inventory = InventoryRepository::new(self.db.clone());
        let item = inventory
            .find_by_id(item_id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::NotFound(format!("Inventory item {item_id}")))?;

        // Tenancy: items are only visible to their own restaurant
        if item.restaurant_name != ctx.restaurant_name {
            return Err(AppError::NotFound(format!("Inventory item {item_id}")));
        }

        let outcome = transition(
            item.stock,
            item.max_stock,
            item.low_stock_threshold,
            mutation,
        )?;

        let updated = inventory
            .update_stock(item_id, outcome.new_stock)
            .await
            .map_err(AppError::from)?;

        let notification = if outcome.low_stock_alert {
            let notifications = NotificationRepository::new(self.db.clone());
            let message = format!(
                "Low stock: {} is down to {} {}",
                updated.name, updated.stock, updated.unit
            );
            let created = notifications
                .create(&updated.restaurant_name, NotificationKind::Stock, &message)
                .await
                .map_err(AppError::from)?;

            tracing::info!(
                item = %updated.name,
                stock = %updated.stock,
                "Low stock threshold crossed"
            );
            Some(created)
        } else {
            None
        };

        Ok(StockUpdateOutcome {
            item: updated,
            notification,
        })
    }
}
