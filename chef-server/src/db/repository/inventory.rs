//! Inventory Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{InventoryItem, InventoryItemCreate, InventoryItemUpdate};
use rust_decimal::Decimal;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct InventoryRepository {
    base: BaseRepository,
}

impl InventoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// List one restaurant's items
    pub async fn find_by_restaurant(
        &self,
        restaurant_name: &str,
    ) -> RepoResult<Vec<InventoryItem>> {
        let restaurant = restaurant_name.to_string();
        let items: Vec<InventoryItem> = self
            .base
            .db()
            .query("SELECT * FROM inventory WHERE restaurant_name = $restaurant ORDER BY name")
            .bind(("restaurant", restaurant))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<InventoryItem>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let item: Option<InventoryItem> = self.base.db().select(thing).await?;
        Ok(item)
    }

    /// Create a new item
    pub async fn create(
        &self,
        restaurant_name: &str,
        data: InventoryItemCreate,
    ) -> RepoResult<InventoryItem> {
        if data.max_stock <= Decimal::ZERO {
            return Err(RepoError::Validation(
                "max_stock must be positive".to_string(),
            ));
        }
        if data.stock < Decimal::ZERO {
            return Err(RepoError::Validation("stock cannot be negative".to_string()));
        }

        let now = shared::util::now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE inventory SET
                    restaurant_name = $restaurant,
                    name = $name,
                    category = $category,
                    unit = $unit,
                    stock = $stock,
                    max_stock = $max_stock,
                    low_stock_threshold = $low_stock_threshold,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("restaurant", restaurant_name.to_string()))
            .bind(("name", data.name))
            .bind(("category", data.category))
            .bind(("unit", data.unit))
            .bind(("stock", data.stock))
            .bind(("max_stock", data.max_stock))
            .bind(("low_stock_threshold", data.low_stock_threshold))
            .bind(("now", now))
            .await?;

        let created: Option<InventoryItem> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create inventory item".to_string()))
    }

    /// Update item metadata (never touches `stock`)
    pub async fn update(&self, id: &str, data: InventoryItemUpdate) -> RepoResult<InventoryItem> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Inventory item {} not found", id)))?;

        if let Some(max_stock) = data.max_stock
            && max_stock <= Decimal::ZERO
        {
            return Err(RepoError::Validation(
                "max_stock must be positive".to_string(),
            ));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    category = $category OR category,
                    unit = $unit OR unit,
                    max_stock = IF $has_max THEN $max_stock ELSE max_stock END,
                    low_stock_threshold = IF $has_threshold THEN $low_stock_threshold ELSE low_stock_threshold END,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("category", data.category))
            .bind(("unit", data.unit))
            .bind(("has_max", data.max_stock.is_some()))
            .bind(("max_stock", data.max_stock))
            .bind(("has_threshold", data.low_stock_threshold.is_some()))
            .bind(("low_stock_threshold", data.low_stock_threshold))
            .bind(("now", shared::util::now_millis()))
            .await?;

        result
            .take::<Option<InventoryItem>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Inventory item {} not found", id)))
    }

    /// Persist a new stock level computed by the stock ledger
    pub async fn update_stock(&self, id: &str, new_stock: Decimal) -> RepoResult<InventoryItem> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET stock = $stock, updated_at = $now RETURN AFTER")
            .bind(("thing", thing))
            .bind(("stock", new_stock))
            .bind(("now", shared::util::now_millis()))
            .await?;

        result
            .take::<Option<InventoryItem>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Inventory item {} not found", id)))
    }

    /// Hard delete an item
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Inventory item {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
