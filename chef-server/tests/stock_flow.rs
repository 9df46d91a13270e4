//! Stock ledger persistence and notification pairing against an
//! in-memory database.

use chef_server::auth::CurrentUser;
use chef_server::core::{Config, ServerState};
use chef_server::db::DbService;
use chef_server::db::models::{InventoryItemCreate, Role};
use chef_server::db::repository::{InventoryRepository, NotificationRepository};
use chef_server::stock::StockMutation;
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

async fn seed_item(state: &ServerState, restaurant: &str) -> String {
    let repo = InventoryRepository::new(state.db.clone());
    let item = repo
        .create(
            restaurant,
            InventoryItemCreate {
                name: "Tomatoes".to_string(),
                category: "Produce".to_string(),
                unit: "kg".to_string(),
                stock: dec("25"),
                max_stock: dec("100"),
                low_stock_threshold: Some(dec("0.2")),
            },
        )
        .await
        .unwrap();
    item.id.unwrap().to_string()
}

#[tokio::test]
async fn consuming_across_the_threshold_fires_one_notification() {
    let state = test_state().await;
    let ctx = cashier("Chez Fifi");
    let id = seed_item(&state, "Chez Fifi").await;

    // 25 -> 15 crosses the alert level (20)
    let outcome = state
        .stock
        .apply_mutation(&ctx, &id, StockMutation::Consume(dec("10")))
        .await
        .unwrap();
    assert_eq!(outcome.item.stock, dec("15"));
    let notification = outcome.notification.expect("alert should fire");
    assert!(notification.message.contains("Tomatoes"));
    assert!(!notification.is_read);

    // 15 -> 14 stays below: no second alert
    let outcome = state
        .stock
        .apply_mutation(&ctx, &id, StockMutation::Consume(dec("1")))
        .await
        .unwrap();
    assert_eq!(outcome.item.stock, dec("14"));
    assert!(outcome.notification.is_none());

    let notifications = NotificationRepository::new(state.db.clone());
    let all = notifications
        .find_by_restaurant("Chez Fifi", false)
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn over_consumption_is_rejected_without_persisting() {
    let state = test_state().await;
    let ctx = cashier("Chez Fifi");
    let id = seed_item(&state, "Chez Fifi").await;

    let err = state
        .stock
        .apply_mutation(&ctx, &id, StockMutation::Consume(dec("26")))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NegativeStock(_)));

    // Stored stock is untouched and no alert fired
    let repo = InventoryRepository::new(state.db.clone());
    let item = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(item.stock, dec("25"));

    let notifications = NotificationRepository::new(state.db.clone());
    assert!(
        notifications
            .find_by_restaurant("Chez Fifi", false)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn repeated_recount_is_idempotent_with_a_single_alert() {
    let state = test_state().await;
    let ctx = cashier("Chez Fifi");
    let id = seed_item(&state, "Chez Fifi").await;

    // 25 -> 12 crosses the edge
    let first = state
        .stock
        .apply_mutation(&ctx, &id, StockMutation::PhysicalCount(dec("12")))
        .await
        .unwrap();
    assert_eq!(first.item.stock, dec("12"));
    assert!(first.notification.is_some());

    // Same recount again: same state, no new alert
    let second = state
        .stock
        .apply_mutation(&ctx, &id, StockMutation::PhysicalCount(dec("12")))
        .await
        .unwrap();
    assert_eq!(second.item.stock, dec("12"));
    assert!(second.notification.is_none());

    let notifications = NotificationRepository::new(state.db.clone());
    let all = notifications
        .find_by_restaurant("Chez Fifi", false)
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn restocking_back_up_emits_no_recovery_notice() {
    let state = test_state().await;
    let ctx = cashier("Chez Fifi");
    let id = seed_item(&state, "Chez Fifi").await;

    state
        .stock
        .apply_mutation(&ctx, &id, StockMutation::Consume(dec("10")))
        .await
        .unwrap();

    let outcome = state
        .stock
        .apply_mutation(&ctx, &id, StockMutation::Restock(dec("50")))
        .await
        .unwrap();
    assert_eq!(outcome.item.stock, dec("65"));
    assert!(outcome.notification.is_none());
}

#[tokio::test]
async fn items_are_invisible_to_other_restaurants() {
    let state = test_state().await;
    let id = seed_item(&state, "Chez Fifi").await;

    let outsider = cashier("Bistro B");
    let err = state
        .stock
        .apply_mutation(&outsider, &id, StockMutation::Consume(dec("1")))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn mark_read_flips_the_flag_without_deleting() {
    let state = test_state().await;
    let ctx = cashier("Chez Fifi");
    let id = seed_item(&state, "Chez Fifi").await;

    state
        .stock
        .apply_mutation(&ctx, &id, StockMutation::Consume(dec("10")))
        .await
        .unwrap();

    let notifications = NotificationRepository::new(state.db.clone());
    let all = notifications
        .find_by_restaurant("Chez Fifi", false)
        .await
        .unwrap();
    let notification_id = all[0].id.as_ref().unwrap().to_string();

    let updated = notifications.mark_read(&notification_id).await.unwrap();
    assert!(updated.is_read);

    // Unread filter no longer returns it, but it still exists
    assert!(
        notifications
            .find_by_restaurant("Chez Fifi", true)
            .await
            .unwrap()
            .is_empty()
    );
    assert_eq!(
        notifications
            .find_by_restaurant("Chez Fifi", false)
            .await
            .unwrap()
            .len(),
        1
    );
}
