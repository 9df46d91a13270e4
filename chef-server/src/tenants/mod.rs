//! Restaurant/tenant administration
//!
//! A restaurant is not a first-class record: it exists as the grouping
//! of the user profiles that carry its name. This module holds the
//! read-model projection over those profiles and the one batch mutation
//! that spans a whole restaurant.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::{Capability, CurrentUser};
use crate::db::models::{Role, UserProfile, UserStatus};
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

/// Bucket name for profiles without an assigned restaurant
pub const UNASSIGNED_RESTAURANT: &str = "Unassigned";

/// One restaurant's staff, as projected from the `users` collection
#[derive(Debug, Clone, serde::Serialize)]
pub struct RestaurantDirectory {
    pub restaurant_name: String,
    /// The restaurant's admin. Intended to be unique, but uniqueness is
    /// not enforced anywhere; see [`project_restaurants`].
    pub admin: Option<UserProfile>,
    pub employees: Vec<UserProfile>,
}

/// Project the full user collection into per-restaurant buckets.
///
/// Buckets appear in first-encounter order of the source iteration.
/// `Super Admin` profiles are excluded from every bucket. When several
/// profiles of one restaurant carry the `Admin` role, the last one
/// encountered takes the admin slot and the earlier ones are dropped
/// from the projection entirely — they do not fall back into
/// `employees`. Kept exactly as the legacy dashboard computed it; see
/// DESIGN.md before changing this.
pub fn project_restaurants(
    users: impl IntoIterator<Item = UserProfile>,
) -> Vec<RestaurantDirectory> {
    let mut order: Vec<String> = Vec::new();
    let mut buckets: std::collections::HashMap<String, RestaurantDirectory> =
        std::collections::HashMap::new();

    for user in users {
        if matches!(user.role, Role::SuperAdmin) {
            continue;
        }

        let key = if user.restaurant_name.is_empty() {
            UNASSIGNED_RESTAURANT.to_string()
        } else {
            user.restaurant_name.clone()
        };

        let bucket = buckets.entry(key.clone()).or_insert_with(|| {
            order.push(key.clone());
            RestaurantDirectory {
                restaurant_name: key,
                admin: None,
                employees: Vec::new(),
            }
        });

        match user.role {
            Role::Admin => bucket.admin = Some(user),
            _ => bucket.employees.push(user),
        }
    }

    order
        .into_iter()
        .filter_map(|key| buckets.remove(&key))
        .collect()
}

/// Tenant administration service
#[derive(Clone)]
pub struct TenantService {
    db: Surreal<Db>,
}

impl TenantService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    /// The full restaurant directory (platform administration view)
    pub async fn directory(&self, ctx: &CurrentUser) -> AppResult<Vec<RestaurantDirectory>> {
        ctx.require(Capability::TenantsAdminister)?;

        let users = UserRepository::new(self.db.clone())
            .find_all()
            .await
            .map_err(AppError::from)?;
        Ok(project_restaurants(users))
    }

    /// Enable or disable every account of one restaurant in a single
    /// atomic batch. Returns the number of accounts updated.
    pub async fn set_restaurant_status(
        &self,
        ctx: &CurrentUser,
        restaurant_name: &str,
        enabled: bool,
    ) -> AppResult<usize> {
        ctx.require(Capability::TenantsAdminister)?;

        let status = if enabled {
            UserStatus::Enabled
        } else {
            UserStatus::Disabled
        };

        let updated = UserRepository::new(self.db.clone())
            .set_restaurant_status(restaurant_name, status)
            .await
            .map_err(AppError::from)?;

        tracing::info!(
            restaurant = restaurant_name,
            enabled,
            accounts = updated.len(),
            "Restaurant status toggled"
        );

        Ok(updated.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, role: Role, restaurant: &str) -> UserProfile {
        UserProfile {
            id: None,
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            name: name.to_string(),
            hash_pass: String::new(),
            role,
            restaurant_name: restaurant.to_string(),
            status: UserStatus::Enabled,
            created_at: None,
        }
    }

    #[test]
    fn groups_admin_and_employees_and_skips_super_admin() {
        let projected = project_restaurants(vec![
            user("Fifi", Role::Admin, "Chez Fifi"),
            user("Marcel", Role::Cashier, "Chez Fifi"),
            user("Platform", Role::SuperAdmin, ""),
        ]);

        assert_eq!(projected.len(), 1);
        let bucket = &projected[0];
        assert_eq!(bucket.restaurant_name, "Chez Fifi");
        assert_eq!(bucket.admin.as_ref().unwrap().name, "Fifi");
        assert_eq!(bucket.employees.len(), 1);
        assert_eq!(bucket.employees[0].name, "Marcel");
    }

    #[test]
    fn duplicate_admins_keep_the_last_and_drop_the_earlier() {
        let projected = project_restaurants(vec![
            user("First Admin", Role::Admin, "Chez Fifi"),
            user("Second Admin", Role::Admin, "Chez Fifi"),
        ]);

        assert_eq!(projected.len(), 1);
        let bucket = &projected[0];
        assert_eq!(bucket.admin.as_ref().unwrap().name, "Second Admin");
        // The first admin vanishes from the projection entirely
        assert!(bucket.employees.is_empty());
    }

    #[test]
    fn missing_restaurant_name_falls_into_the_placeholder_bucket() {
        let projected = project_restaurants(vec![user("Drifter", Role::Cashier, "")]);

        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].restaurant_name, UNASSIGNED_RESTAURANT);
        assert_eq!(projected[0].employees.len(), 1);
    }

    #[test]
    fn buckets_appear_in_first_encounter_order() {
        let projected = project_restaurants(vec![
            user("A", Role::Cashier, "Bistro B"),
            user("B", Role::Admin, "Chez Fifi"),
            user("C", Role::Cashier, "Bistro B"),
        ]);

        let names: Vec<&str> = projected
            .iter()
            .map(|b| b.restaurant_name.as_str())
            .collect();
        assert_eq!(names, vec!["Bistro B", "Chez Fifi"]);
        assert_eq!(projected[0].employees.len(), 2);
    }

    #[test]
    fn super_admin_appears_in_no_bucket_even_with_restaurant_name() {
        let projected = project_restaurants(vec![
            user("Platform", Role::SuperAdmin, "Chez Fifi"),
            user("Marcel", Role::Cashier, "Chez Fifi"),
        ]);

        assert_eq!(projected.len(), 1);
        assert!(projected[0].admin.is_none());
        assert_eq!(projected[0].employees.len(), 1);
    }
}
