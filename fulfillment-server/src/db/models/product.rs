//! Product Model
//!
//! Owned by the catalog store; this service only reads products and applies
//! narrow stock decrements during fulfillment.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub type ProductId = RecordId;

/// Product model (as consumed by the fulfillment pipeline)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<ProductId>,
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    /// Units on hand; fulfillment decrements this without a zero floor
    pub stock: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub image: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
}
