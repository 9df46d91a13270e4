//! End-to-end register lifecycle against an in-memory database.

use chef_server::auth::CurrentUser;
use chef_server::core::{Config, ServerState};
use chef_server::db::DbService;
use chef_server::db::models::Role;
use chef_server::db::repository::JournalRepository;
use chef_server::utils::AppError;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

async fn test_state() -> ServerState {
    let db = DbService::memory().await.unwrap();
    ServerState::from_parts(Config::from_env(), db.db)
}

fn cashier(restaurant: &str) -> CurrentUser {
    CurrentUser {
        id: "users:cashier1".to_string(),
        name: "Marcel".to_string(),
        role: Role::Cashier,
        restaurant_name: restaurant.to_string(),
        token_iat: 0,
    }
}

fn super_admin() -> CurrentUser {
    CurrentUser {
        id: "users:platform".to_string(),
        name: "Platform".to_string(),
        role: Role::SuperAdmin,
        restaurant_name: String::new(),
        token_iat: 0,
    }
}

#[tokio::test]
async fn open_compute_close_writes_one_journal_entry() {
    let state = test_state().await;
    let ctx = cashier("Chez Fifi");

    let session = state.registers.open(&ctx, "100").await.unwrap();
    assert!(session.is_open);
    assert_eq!(session.opened_by.as_deref(), Some("Marcel"));
    assert_eq!(session.opening_cash, Some(dec("100")));

    let quote = state
        .registers
        .compute_variance(&ctx, "970", dec("875.50"))
        .await
        .unwrap();
    assert_eq!(quote.expected_cash, dec("975.50"));
    assert_eq!(quote.variance, dec("-5.50"));

    let entry = state.registers.close(&ctx, dec("1250.75")).await.unwrap();
    assert_eq!(entry.variance, dec("-5.50"));
    assert_eq!(entry.opening_cash, dec("100"));
    assert_eq!(entry.total_sales, dec("1250.75"));
    assert_eq!(entry.closed_by, "Marcel");

    // Session is back to the initial closed state with no leftovers
    let after = state.registers.current(&ctx).await.unwrap();
    assert!(!after.is_open);
    assert!(after.opened_by.is_none());
    assert!(after.open_time.is_none());
    assert!(after.opening_cash.is_none());

    // Exactly one journal entry
    let journal = JournalRepository::new(state.db.clone());
    let entries = journal.find_by_restaurant("Chez Fifi").await.unwrap();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn double_open_is_rejected_and_preserves_the_first_session() {
    let state = test_state().await;
    let first_opener = cashier("Chez Fifi");
    let mut second_opener = cashier("Chez Fifi");
    second_opener.name = "Georgette".to_string();

    state.registers.open(&first_opener, "100").await.unwrap();

    let err = state.registers.open(&second_opener, "999").await.unwrap_err();
    assert!(matches!(err, AppError::InvalidStateTransition(_)));

    let session = state.registers.current(&first_opener).await.unwrap();
    assert_eq!(session.opened_by.as_deref(), Some("Marcel"));
    assert_eq!(session.opening_cash, Some(dec("100")));
}

#[tokio::test]
async fn close_requires_a_computed_variance() {
    let state = test_state().await;
    let ctx = cashier("Chez Fifi");

    state.registers.open(&ctx, "50").await.unwrap();

    let err = state.registers.close(&ctx, dec("500")).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidStateTransition(_)));

    // Nothing was journaled
    let journal = JournalRepository::new(state.db.clone());
    assert!(journal.find_by_restaurant("Chez Fifi").await.unwrap().is_empty());
}

#[tokio::test]
async fn operations_on_a_closed_register_are_rejected() {
    let state = test_state().await;
    let ctx = cashier("Chez Fifi");

    let err = state
        .registers
        .compute_variance(&ctx, "100", dec("0"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidStateTransition(_)));

    let err = state.registers.close(&ctx, dec("0")).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidStateTransition(_)));
}

#[tokio::test]
async fn recompute_replaces_the_previous_quote() {
    let state = test_state().await;
    let ctx = cashier("Chez Fifi");

    state.registers.open(&ctx, "100").await.unwrap();

    state
        .registers
        .compute_variance(&ctx, "970", dec("875.50"))
        .await
        .unwrap();
    let second = state
        .registers
        .compute_variance(&ctx, "980", dec("875.50"))
        .await
        .unwrap();
    assert_eq!(second.variance, dec("4.50"));

    let entry = state.registers.close(&ctx, dec("900")).await.unwrap();
    assert_eq!(entry.variance, dec("4.50"));
}

#[tokio::test]
async fn missing_or_garbled_opening_cash_is_a_validation_error() {
    let state = test_state().await;
    let ctx = cashier("Chez Fifi");

    let err = state.registers.open(&ctx, "").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = state.registers.open(&ctx, "12,50x").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Neither attempt opened the drawer
    assert!(!state.registers.current(&ctx).await.unwrap().is_open);
}

#[tokio::test]
async fn super_admin_cannot_operate_the_drawer() {
    let state = test_state().await;
    let ctx = super_admin();

    let err = state.registers.open(&ctx, "100").await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn drawers_are_independent_per_restaurant() {
    let state = test_state().await;
    let fifi = cashier("Chez Fifi");
    let bistro = cashier("Bistro B");

    state.registers.open(&fifi, "100").await.unwrap();

    // The other restaurant's drawer is still closed and can open
    assert!(!state.registers.current(&bistro).await.unwrap().is_open);
    state.registers.open(&bistro, "80").await.unwrap();

    // A quote computed for one restaurant does not unlock the other's close
    state
        .registers
        .compute_variance(&fifi, "150", dec("40"))
        .await
        .unwrap();
    let err = state.registers.close(&bistro, dec("0")).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidStateTransition(_)));
}
