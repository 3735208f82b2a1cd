//! Stock ledger
//!
//! Applies the inventory decrement tied to fulfilled order lines.

use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::FulfillmentError;
use crate::db::models::Product;
use crate::db::repository::ProductRepository;

/// Inventory decrements for fulfilled order lines
#[derive(Clone)]
pub struct StockLedger {
    products: ProductRepository,
}

impl StockLedger {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            products: ProductRepository::new(db),
        }
    }

    /// Subtract `quantity` from the product's stock
    ///
    /// Fails with [`FulfillmentError::ProductNotFound`] when the product is
    /// missing. The write itself is the repository's narrow stock mutation:
    /// no zero floor, no catalog-level validation.
    pub async fn decrement(
        &self,
        product: &RecordId,
        quantity: i64,
    ) -> Result<Product, FulfillmentError> {
        if self.products.find_by_record(product).await?.is_none() {
            return Err(FulfillmentError::ProductNotFound(product.to_string()));
        }

        let updated = self
            .products
            .decrement_stock(product, quantity)
            .await?
            .ok_or_else(|| FulfillmentError::ProductNotFound(product.to_string()))?;

        tracing::debug!(
            product = %product,
            quantity = quantity,
            stock = updated.stock,
            "Stock decremented"
        );
        Ok(updated)
    }
}
