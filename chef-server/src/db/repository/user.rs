//! User Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{UserCreate, UserProfile, UserStatus, UserUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find every profile, in creation order.
    ///
    /// Creation order keeps the restaurant aggregation deterministic.
    pub async fn find_all(&self) -> RepoResult<Vec<UserProfile>> {
        let users: Vec<UserProfile> = self
            .base
            .db()
            .query("SELECT * FROM users ORDER BY created_at")
            .await?
            .take(0)?;
        Ok(users)
    }

    /// Find all profiles of one restaurant
    pub async fn find_by_restaurant(&self, restaurant_name: &str) -> RepoResult<Vec<UserProfile>> {
        let restaurant = restaurant_name.to_string();
        let users: Vec<UserProfile> = self
            .base
            .db()
            .query("SELECT * FROM users WHERE restaurant_name = $restaurant ORDER BY created_at")
            .bind(("restaurant", restaurant))
            .await?
            .take(0)?;
        Ok(users)
    }

    /// Find profile by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<UserProfile>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let user: Option<UserProfile> = self.base.db().select(thing).await?;
        Ok(user)
    }

    /// Find profile by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserProfile>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM users WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let users: Vec<UserProfile> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new profile
    pub async fn create(&self, data: UserCreate) -> RepoResult<UserProfile> {
        // Check duplicate email
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already exists",
                data.email
            )));
        }

        let hash_pass = UserProfile::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE users SET
                    email = $email,
                    name = $name,
                    hash_pass = $hash_pass,
                    role = $role,
                    restaurant_name = $restaurant_name,
                    status = $status,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("email", data.email))
            .bind(("name", data.name))
            .bind(("hash_pass", hash_pass))
            .bind(("role", data.role))
            .bind(("restaurant_name", data.restaurant_name))
            .bind(("status", UserStatus::Enabled))
            .bind(("created_at", shared::util::now_millis()))
            .await?;

        let created: Option<UserProfile> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Update a profile
    pub async fn update(&self, id: &str, data: UserUpdate) -> RepoResult<UserProfile> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))?;

        let hash_pass = if let Some(ref password) = data.password {
            Some(
                UserProfile::hash_password(password)
                    .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?,
            )
        } else {
            None
        };

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    hash_pass = $hash_pass OR hash_pass,
                    role = IF $has_role THEN $role ELSE role END,
                    restaurant_name = IF $has_restaurant THEN $restaurant_name ELSE restaurant_name END,
                    status = IF $has_status THEN $status ELSE status END
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("hash_pass", hash_pass))
            .bind(("has_role", data.role.is_some()))
            .bind(("role", data.role))
            .bind(("has_restaurant", data.restaurant_name.is_some()))
            .bind(("restaurant_name", data.restaurant_name))
            .bind(("has_status", data.status.is_some()))
            .bind(("status", data.status))
            .await?;

        result
            .take::<Option<UserProfile>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Enable or disable every account of one restaurant.
    ///
    /// Applies as a single transaction: either all of the restaurant's
    /// profiles change status or none do. Returns the updated profiles.
    pub async fn set_restaurant_status(
        &self,
        restaurant_name: &str,
        status: UserStatus,
    ) -> RepoResult<Vec<UserProfile>> {
        let restaurant = restaurant_name.to_string();
        let mut result = self
            .base
            .db()
            .query(
                r#"BEGIN TRANSACTION;
                UPDATE users SET status = $status WHERE restaurant_name = $restaurant RETURN AFTER;
                COMMIT TRANSACTION;"#,
            )
            .bind(("status", status))
            .bind(("restaurant", restaurant))
            .await?;

        let updated: Vec<UserProfile> = result.take(0)?;
        Ok(updated)
    }

    /// Hard delete a profile
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
