//! Product Repository
//!
//! The catalog store owns products; fulfillment only reads them and applies
//! the stock decrement for fulfilled lines.

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Product, ProductCreate};

pub const PRODUCT_TABLE: &str = "product";

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

    pub async fn find_by_record(&self, id: &RecordId) -> RepoResult<Option<Product>> {
        let product: Option<Product> = self.base.db().select(id.clone()).await?;
        Ok(product)
    }

    pub async fn find_by_id(&self, key: &str) -> RepoResult<Option<Product>> {
        self.find_by_record(&RecordId::from_table_key(PRODUCT_TABLE, key))
            .await
    }

    /// Create a product (seeds and tests)
    pub async fn create(&self, key: Option<&str>, data: ProductCreate) -> RepoResult<Product> {
        let created: Option<Product> = match key {
            Some(k) => {
                self.base
                    .db()
                    .create((PRODUCT_TABLE, k.to_string()))
                    .content(data)
                    .await?
            }
            None => self.base.db().create(PRODUCT_TABLE).content(data).await?,
        };
        created.ok_or_else(|| RepoError::Database("Product create returned no record".to_string()))
    }

    /// Subtract `quantity` from the stored stock level
    ///
    /// This is a narrow, trusted mutation that touches only the stock field,
    /// deliberately bypassing the catalog's general product-update validation.
    /// No zero floor is applied; the result may go negative.
    pub async fn decrement_stock(
        &self,
        id: &RecordId,
        quantity: i64,
    ) -> RepoResult<Option<Product>> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $product SET stock -= $qty RETURN AFTER")
            .bind(("product", id.clone()))
            .bind(("qty", quantity))
            .await?;
        let updated: Vec<Product> = result.take(0)?;
        Ok(updated.into_iter().next())
    }
}
