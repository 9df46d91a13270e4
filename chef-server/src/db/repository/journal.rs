//! Journal Repository
//!
//! Append-only: entries are created once and only ever read back.
//! No update or delete is ever issued against `journals`.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::JournalEntry;
use rust_decimal::Decimal;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct JournalRepository {
    base: BaseRepository,
}

impl JournalRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Append one journal entry
    pub async fn append(
        &self,
        restaurant_name: &str,
        date: &str,
        total_sales: Decimal,
        opening_cash: Decimal,
        variance: Decimal,
        closed_by: &str,
    ) -> RepoResult<JournalEntry> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE journals SET
                    restaurant_name = $restaurant,
                    date = $date,
                    total_sales = $total_sales,
                    opening_cash = $opening_cash,
                    variance = $variance,
                    closed_by = $closed_by,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("restaurant", restaurant_name.to_string()))
            .bind(("date", date.to_string()))
            .bind(("total_sales", total_sales))
            .bind(("opening_cash", opening_cash))
            .bind(("variance", variance))
            .bind(("closed_by", closed_by.to_string()))
            .bind(("created_at", shared::util::now_millis()))
            .await?;

        let entry: Option<JournalEntry> = result.take(0)?;
        entry.ok_or_else(|| RepoError::Database("Failed to append journal entry".to_string()))
    }

    /// List one restaurant's entries, newest first
    pub async fn find_by_restaurant(
        &self,
        restaurant_name: &str,
    ) -> RepoResult<Vec<JournalEntry>> {
        let restaurant = restaurant_name.to_string();
        let entries: Vec<JournalEntry> = self
            .base
            .db()
            .query(
                "SELECT * FROM journals WHERE restaurant_name = $restaurant ORDER BY created_at DESC",
            )
            .bind(("restaurant", restaurant))
            .await?
            .take(0)?;
        Ok(entries)
    }

    /// List one restaurant's entries within a calendar-day range (inclusive)
    pub async fn find_by_date_range(
        &self,
        restaurant_name: &str,
        start_date: &str,
        end_date: &str,
    ) -> RepoResult<Vec<JournalEntry>> {
        let entries: Vec<JournalEntry> = self
            .base
            .db()
            .query(
                r#"SELECT * FROM journals
                WHERE restaurant_name = $restaurant
                    AND date >= $start_date
                    AND date <= $end_date
                ORDER BY created_at DESC"#,
            )
            .bind(("restaurant", restaurant_name.to_string()))
            .bind(("start_date", start_date.to_string()))
            .bind(("end_date", end_date.to_string()))
            .await?
            .take(0)?;
        Ok(entries)
    }

    /// Find entry by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<JournalEntry>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let entry: Option<JournalEntry> = self.base.db().select(thing).await?;
        Ok(entry)
    }
}
