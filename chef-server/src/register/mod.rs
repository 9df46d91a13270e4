//! Register Session Manager
//!
//! Drives the daily cash-drawer lifecycle for each restaurant:
//!
//! ```text
//!          OpenRegister                ComputeVariance (any number of times)
//! Closed ───────────────▶ Open ──────────────────────────────┐
//!    ▲                     │ ◀─────────────────────────────┘
//!    │                     │ CloseRegister (requires a computed variance)
//!    └─────────────────────┘   appends one journal entry, clears the session
//! ```
//!
//! The persisted session lives in `register_sessions`; the last computed
//! variance is transient and kept in memory for the open period only.
//! After a restart the variance must be recomputed before the drawer can
//! close.

#[cfg(test)]
mod tests;

use dashmap::DashMap;
use rust_decimal::Decimal;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::{Capability, CurrentUser};
use crate::db::models::{JournalEntry, RegisterSession, VarianceQuote};
use crate::db::repository::{JournalRepository, RegisterSessionRepository};
use crate::utils::{AppError, AppResult};

/// Parse an operator-typed cash amount.
///
/// Inputs come from free-text fields: empty means the operator skipped
/// the field, anything unparseable is a typo. Nothing beyond
/// parseability is validated here.
pub(crate) fn parse_cash_input(field: &str, raw: &str) -> AppResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    trimmed
        .parse::<Decimal>()
        .map_err(|_| AppError::Validation(format!("{field} is not a valid amount")))
}

/// Variance arithmetic: expected = cash sales + opening float,
/// variance = counted - expected (negative = shortage).
pub(crate) fn compute_variance_amounts(
    opening_cash: Decimal,
    cash_sales: Decimal,
    actual_cash: Decimal,
) -> (Decimal, Decimal) {
    let expected_cash = cash_sales + opening_cash;
    let variance = actual_cash - expected_cash;
    (expected_cash, variance)
}

/// Register session manager, shared across requests
pub struct RegisterManager {
    db: Surreal<Db>,
    /// Last computed variance per restaurant, for the open period only
    quotes: DashMap<String, VarianceQuote>,
}

impl RegisterManager {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            db,
            quotes: DashMap::new(),
        }
    }

    fn sessions(&self) -> RegisterSessionRepository {
        RegisterSessionRepository::new(self.db.clone())
    }

    /// Current drawer state of the caller's restaurant
    pub async fn current(&self, ctx: &CurrentUser) -> AppResult<RegisterSession> {
        let session = self
            .sessions()
            .find_by_restaurant(&ctx.restaurant_name)
            .await
            .map_err(AppError::from)?;
        Ok(session.unwrap_or_else(|| RegisterSession::closed(&ctx.restaurant_name)))
    }

    /// Last computed variance of the caller's restaurant, if any
    pub fn last_quote(&self, ctx: &CurrentUser) -> Option<VarianceQuote> {
        self.quotes.get(&ctx.restaurant_name).map(|q| q.clone())
    }

    /// Open the drawer with the declared opening float.
    ///
    /// Valid only while closed. The declared amount must be supplied and
    /// parseable; its numeric range is not checked.
    pub async fn open(
        &self,
        ctx: &CurrentUser,
        declared_opening_cash: &str,
    ) -> AppResult<RegisterSession> {
        ctx.require(Capability::RegisterOperate)?;

        let opening_cash = parse_cash_input("Opening cash", declared_opening_cash)?;

        let current = self.current(ctx).await?;
        if current.is_open {
            return Err(AppError::InvalidStateTransition(
                "Register is already open".to_string(),
            ));
        }

        // A previous period's quote must not leak into this one
        self.quotes.remove(&ctx.restaurant_name);

        let session = self
            .sessions()
            .open(
                &ctx.restaurant_name,
                &ctx.name,
                shared::util::now_millis(),
                opening_cash,
            )
            .await
            .map_err(AppError::from)?;

        tracing::info!(
            restaurant = %ctx.restaurant_name,
            opened_by = %ctx.name,
            opening_cash = %opening_cash,
            "Register opened"
        );

        Ok(session)
    }

    /// Compute the cash variance against the counted amount.
    ///
    /// Valid only while open. Pure with respect to the persisted session;
    /// recomputing replaces the previous quote.
    pub async fn compute_variance(
        &self,
        ctx: &CurrentUser,
        actual_cash_counted: &str,
        cash_sales_today: Decimal,
    ) -> AppResult<VarianceQuote> {
        let actual_cash = parse_cash_input("Counted cash", actual_cash_counted)?;

        let current = self.current(ctx).await?;
        if !current.is_open {
            return Err(AppError::InvalidStateTransition(
                "Register is not open".to_string(),
            ));
        }
        let opening_cash = current.opening_cash.ok_or_else(|| {
            AppError::Internal("Open register without opening cash".to_string())
        })?;

        let (expected_cash, variance) =
            compute_variance_amounts(opening_cash, cash_sales_today, actual_cash);

        let quote = VarianceQuote {
            actual_cash,
            cash_sales: cash_sales_today,
            expected_cash,
            variance,
            computed_at: shared::util::now_millis(),
        };
        self.quotes.insert(ctx.restaurant_name.clone(), quote.clone());

        Ok(quote)
    }

    /// Close the drawer: append the day's journal entry and clear the
    /// session.
    ///
    /// Valid only while open, and only once a variance has been computed
    /// during this open period. The journal append is the single durable
    /// side effect; entries are never updated afterwards.
    pub async fn close(
        &self,
        ctx: &CurrentUser,
        total_sales: Decimal,
    ) -> AppResult<JournalEntry> {
        ctx.require(Capability::RegisterOperate)?;

        let current = self.current(ctx).await?;
        if !current.is_open {
            return Err(AppError::InvalidStateTransition(
                "Register is not open".to_string(),
            ));
        }

        let quote = self
            .quotes
            .get(&ctx.restaurant_name)
            .map(|q| q.clone())
            .ok_or_else(|| {
                AppError::InvalidStateTransition(
                    "Close requires a computed variance".to_string(),
                )
            })?;

        let opening_cash = current.opening_cash.ok_or_else(|| {
            AppError::Internal("Open register without opening cash".to_string())
        })?;

        let entry = JournalRepository::new(self.db.clone())
            .append(
                &ctx.restaurant_name,
                &shared::util::today_string(),
                total_sales,
                opening_cash,
                quote.variance,
                &ctx.name,
            )
            .await
            .map_err(AppError::from)?;

        self.sessions()
            .close(&ctx.restaurant_name)
            .await
            .map_err(AppError::from)?;
        self.quotes.remove(&ctx.restaurant_name);

        tracing::info!(
            restaurant = %ctx.restaurant_name,
            closed_by = %ctx.name,
            variance = %quote.variance,
            "Register closed, journal entry written"
        );

        Ok(entry)
    }
}
