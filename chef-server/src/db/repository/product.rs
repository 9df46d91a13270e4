//! Product Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// List one restaurant's products
    pub async fn find_by_restaurant(&self, restaurant_name: &str) -> RepoResult<Vec<Product>> {
        let restaurant = restaurant_name.to_string();
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM products WHERE restaurant_name = $restaurant ORDER BY name")
            .bind(("restaurant", restaurant))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let product: Option<Product> = self.base.db().select(thing).await?;
        Ok(product)
    }

    /// Create a new product
    pub async fn create(
        &self,
        restaurant_name: &str,
        data: ProductCreate,
    ) -> RepoResult<Product> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE products SET
                    restaurant_name = $restaurant,
                    name = $name,
                    category = $category,
                    price = $price,
                    unit = $unit,
                    is_active = true,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("restaurant", restaurant_name.to_string()))
            .bind(("name", data.name))
            .bind(("category", data.category))
            .bind(("price", data.price))
            .bind(("unit", data.unit))
            .bind(("created_at", shared::util::now_millis()))
            .await?;

        let created: Option<Product> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update a product
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    category = $category OR category,
                    unit = $unit OR unit,
                    price = IF $has_price THEN $price ELSE price END,
                    is_active = IF $has_active THEN $is_active ELSE is_active END
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("category", data.category))
            .bind(("unit", data.unit))
            .bind(("has_price", data.price.is_some()))
            .bind(("price", data.price))
            .bind(("has_active", data.is_active.is_some()))
            .bind(("is_active", data.is_active))
            .await?;

        result
            .take::<Option<Product>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Hard delete a product
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
