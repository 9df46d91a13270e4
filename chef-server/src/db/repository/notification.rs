//! Notification Repository
//!
//! Append + mark-read only. Notifications are never deleted.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Notification, NotificationKind};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct NotificationRepository {
    base: BaseRepository,
}

impl NotificationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Append a notification (unread)
    pub async fn create(
        &self,
        restaurant_name: &str,
        kind: NotificationKind,
        message: &str,
    ) -> RepoResult<Notification> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE notifications SET
                    restaurant_name = $restaurant,
                    message = $message,
                    kind = $kind,
                    is_read = false,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("restaurant", restaurant_name.to_string()))
            .bind(("message", message.to_string()))
            .bind(("kind", kind))
            .bind(("created_at", shared::util::now_millis()))
            .await?;

        let created: Option<Notification> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create notification".to_string()))
    }

    /// List one restaurant's notifications, newest first
    pub async fn find_by_restaurant(
        &self,
        restaurant_name: &str,
        unread_only: bool,
    ) -> RepoResult<Vec<Notification>> {
        let restaurant = restaurant_name.to_string();
        let query = if unread_only {
            "SELECT * FROM notifications WHERE restaurant_name = $restaurant AND is_read = false ORDER BY created_at DESC"
        } else {
            "SELECT * FROM notifications WHERE restaurant_name = $restaurant ORDER BY created_at DESC"
        };

        let notifications: Vec<Notification> = self
            .base
            .db()
            .query(query)
            .bind(("restaurant", restaurant))
            .await?
            .take(0)?;
        Ok(notifications)
    }

    /// Flip `is_read` on one notification
    pub async fn mark_read(&self, id: &str) -> RepoResult<Notification> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET is_read = true RETURN AFTER")
            .bind(("thing", thing))
            .await?;

        result
            .take::<Option<Notification>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Notification {} not found", id)))
    }
}
