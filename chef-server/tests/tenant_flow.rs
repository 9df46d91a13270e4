//! Tenant administration: directory projection over stored profiles and
//! the restaurant-wide status batch.

use chef_server::auth::CurrentUser;
use chef_server::core::{Config, ServerState};
use chef_server::db::DbService;
use chef_server::db::models::{Role, UserCreate, UserStatus};
use chef_server::db::repository::UserRepository;
use chef_server::utils::AppError;

async fn test_state() -> ServerState {
    let db = DbService::memory().await.unwrap();
    ServerState::from_parts(Config::from_env(), db.db)
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

fn admin(restaurant: &str) -> CurrentUser {
    CurrentUser {
        id: "users:admin1".to_string(),
        name: "Fifi".to_string(),
        role: Role::Admin,
        restaurant_name: restaurant.to_string(),
        token_iat: 0,
    }
}

async fn seed_user(state: &ServerState, name: &str, role: Role, restaurant: &str) {
    UserRepository::new(state.db.clone())
        .create(UserCreate {
            email: format!("{}@example.com", name.to_lowercase()),
            password: "secret-password".to_string(),
            name: name.to_string(),
            role,
            restaurant_name: restaurant.to_string(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn directory_groups_by_restaurant_and_hides_super_admins() {
    let state = test_state().await;
    seed_user(&state, "Fifi", Role::Admin, "Chez Fifi").await;
    seed_user(&state, "Marcel", Role::Cashier, "Chez Fifi").await;
    seed_user(&state, "Platform", Role::SuperAdmin, "").await;

    let directory = state.tenants.directory(&super_admin()).await.unwrap();

    assert_eq!(directory.len(), 1);
    let bucket = &directory[0];
    assert_eq!(bucket.restaurant_name, "Chez Fifi");
    assert_eq!(bucket.admin.as_ref().unwrap().name, "Fifi");
    assert_eq!(bucket.employees.len(), 1);
    assert_eq!(bucket.employees[0].name, "Marcel");
}

#[tokio::test]
async fn directory_requires_tenant_administration() {
    let state = test_state().await;

    let err = state.tenants.directory(&admin("Chez Fifi")).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn status_toggle_updates_every_account_of_the_restaurant() {
    let state = test_state().await;
    seed_user(&state, "Fifi", Role::Admin, "Chez Fifi").await;
    seed_user(&state, "Marcel", Role::Cashier, "Chez Fifi").await;
    seed_user(&state, "Outsider", Role::Cashier, "Bistro B").await;

    let updated = state
        .tenants
        .set_restaurant_status(&super_admin(), "Chez Fifi", false)
        .await
        .unwrap();
    assert_eq!(updated, 2);

    let repo = UserRepository::new(state.db.clone());
    for user in repo.find_by_restaurant("Chez Fifi").await.unwrap() {
        assert_eq!(user.status, UserStatus::Disabled);
    }
    // The other restaurant is untouched
    for user in repo.find_by_restaurant("Bistro B").await.unwrap() {
        assert_eq!(user.status, UserStatus::Enabled);
    }

    // And back on again
    let updated = state
        .tenants
        .set_restaurant_status(&super_admin(), "Chez Fifi", true)
        .await
        .unwrap();
    assert_eq!(updated, 2);
    for user in repo.find_by_restaurant("Chez Fifi").await.unwrap() {
        assert_eq!(user.status, UserStatus::Enabled);
    }
}

#[tokio::test]
async fn status_toggle_requires_tenant_administration() {
    let state = test_state().await;

    let err = state
        .tenants
        .set_restaurant_status(&admin("Chez Fifi"), "Chez Fifi", false)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}
