//! Register Session Repository
//!
//! One document per restaurant in `register_sessions`. The repository
//! only moves the drawer between its two states; the lifecycle rules
//! live in the register manager.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::RegisterSession;
use rust_decimal::Decimal;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct RegisterSessionRepository {
    base: BaseRepository,
}

impl RegisterSessionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find the session document of one restaurant, if any
    pub async fn find_by_restaurant(
        &self,
        restaurant_name: &str,
    ) -> RepoResult<Option<RegisterSession>> {
        let restaurant = restaurant_name.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM register_sessions WHERE restaurant_name = $restaurant LIMIT 1")
            .bind(("restaurant", restaurant))
            .await?;
        let sessions: Vec<RegisterSession> = result.take(0)?;
        Ok(sessions.into_iter().next())
    }

    /// Persist the drawer as open
    pub async fn open(
        &self,
        restaurant_name: &str,
        opened_by: &str,
        open_time: i64,
        opening_cash: Decimal,
    ) -> RepoResult<RegisterSession> {
        let restaurant = restaurant_name.to_string();
        let operator = opened_by.to_string();

        let mut result = if let Some(existing) = self.find_by_restaurant(restaurant_name).await? {
            let thing = existing
                .id
                .ok_or_else(|| RepoError::Database("Session without id".to_string()))?;
            self.base
                .db()
                .query(
                    r#"UPDATE $thing SET
                        is_open = true,
                        opened_by = $opened_by,
                        open_time = $open_time,
                        opening_cash = $opening_cash
                    RETURN AFTER"#,
                )
                .bind(("thing", thing))
                .bind(("opened_by", operator))
                .bind(("open_time", open_time))
                .bind(("opening_cash", opening_cash))
                .await?
        } else {
            self.base
                .db()
                .query(
                    r#"CREATE register_sessions SET
                        restaurant_name = $restaurant,
                        is_open = true,
                        opened_by = $opened_by,
                        open_time = $open_time,
                        opening_cash = $opening_cash
                    RETURN AFTER"#,
                )
                .bind(("restaurant", restaurant))
                .bind(("opened_by", operator))
                .bind(("open_time", open_time))
                .bind(("opening_cash", opening_cash))
                .await?
        };

        let session: Option<RegisterSession> = result.take(0)?;
        session.ok_or_else(|| RepoError::Database("Failed to open register".to_string()))
    }

    /// Persist the drawer as closed, clearing every session field
    pub async fn close(&self, restaurant_name: &str) -> RepoResult<RegisterSession> {
        let restaurant = restaurant_name.to_string();
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE register_sessions SET
                    is_open = false,
                    opened_by = NONE,
                    open_time = NONE,
                    opening_cash = NONE
                WHERE restaurant_name = $restaurant
                RETURN AFTER"#,
            )
            .bind(("restaurant", restaurant))
            .await?;

        let sessions: Vec<RegisterSession> = result.take(0)?;
        sessions
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("No register for {restaurant_name}")))
    }
}
