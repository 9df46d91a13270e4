//! Account provisioning through the single-session backend.

use chef_server::auth::CurrentUser;
use chef_server::core::{Config, ServerState};
use chef_server::db::DbService;
use chef_server::db::models::{Role, UserCreate};
use chef_server::utils::AppError;

async fn test_state() -> ServerState {
    let db = DbService::memory().await.unwrap();
    ServerState::from_parts(Config::from_env(), db.db)
}

fn admin(restaurant: &str) -> CurrentUser {
    CurrentUser {
        id: "users:admin1".to_string(),
        name: "Fifi".to_string(),
        role: Role::Admin,
        restaurant_name: restaurant.to_string(),
        token_iat: chrono::Utc::now().timestamp() - 60,
    }
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

fn new_account(restaurant: &str) -> UserCreate {
    UserCreate {
        email: "georgette@example.com".to_string(),
        password: "secret-password".to_string(),
        name: "Georgette".to_string(),
        role: Role::Cashier,
        restaurant_name: restaurant.to_string(),
    }
}

#[tokio::test]
async fn provisioning_creates_the_account_and_drops_the_actor_session() {
    let state = test_state().await;
    let actor = admin("Chez Fifi");

    let outcome = state
        .provisioning
        .create_account(&actor, new_account("Chez Fifi"))
        .await
        .unwrap();

    assert_eq!(outcome.user.email, "georgette@example.com");
    assert!(outcome.actor_session_invalidated);

    // Tokens issued to the actor before the call are now rejected
    assert!(state.sessions.is_revoked(&actor.id, actor.token_iat));
    // The new account itself is untouched
    let created_id = outcome.user.id.unwrap().to_string();
    assert!(!state.sessions.is_revoked(&created_id, actor.token_iat));
}

#[tokio::test]
async fn cashiers_cannot_provision_accounts() {
    let state = test_state().await;

    let err = state
        .provisioning
        .create_account(&cashier("Chez Fifi"), new_account("Chez Fifi"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn admins_cannot_provision_into_other_restaurants() {
    let state = test_state().await;

    let err = state
        .provisioning
        .create_account(&admin("Chez Fifi"), new_account("Bistro B"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let state = test_state().await;
    let actor = admin("Chez Fifi");

    state
        .provisioning
        .create_account(&actor, new_account("Chez Fifi"))
        .await
        .unwrap();

    let err = state
        .provisioning
        .create_account(&actor, new_account("Chez Fifi"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn weak_passwords_are_rejected_by_validation() {
    let state = test_state().await;
    let mut account = new_account("Chez Fifi");
    account.password = "short".to_string();

    let err = state
        .provisioning
        .create_account(&admin("Chez Fifi"), account)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}
