//! Order Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub type OrderId = RecordId;

/// Order lifecycle status
///
/// `Processing → Shipped → Delivered`. Forward skips and staying in place are
/// allowed; `Delivered` is terminal with no outgoing transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// Parse a status string (case-insensitive); `None` for unknown values
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "processing" => Some(Self::Processing),
            "shipped" => Some(Self::Shipped),
            "delivered" => Some(Self::Delivered),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
        }
    }

    /// Terminal statuses admit no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Customer-notification state for an order
///
/// Persisted alongside the order so a failed receipt email is detectable and
/// retryable after the status change has already been committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NotificationState {
    #[default]
    Pending,
    Sent,
    Failed,
}

/// One product entry within an order, with its own quantity and frozen unit price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Record link to the product in the catalog store
    pub product: RecordId,
    pub name: String,
    /// Unit price frozen at checkout
    pub price: f64,
    pub quantity: i32,
    /// Display image reference
    #[serde(default)]
    pub image: String,
}

/// Shipping destination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
}

/// Order model
///
/// The price breakdown is computed at checkout and stored; this service never
/// recomputes it. Invariant: `total_price = items_price + tax_price +
/// shipping_price` (producer's responsibility).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Option<OrderId>,
    /// Record link to the owning customer
    pub user: RecordId,
    pub items: Vec<LineItem>,
    pub shipping: ShippingAddress,
    /// Items subtotal
    pub items_price: f64,
    pub tax_price: f64,
    pub shipping_price: f64,
    /// Grand total
    pub total_price: f64,
    /// Opaque payment marker (payment handling is an external concern)
    #[serde(default)]
    pub is_paid: bool,
    pub status: OrderStatus,
    /// Creation timestamp (Unix millis)
    pub created_at: i64,
    /// Last status-change timestamp (Unix millis); the delivery time once the
    /// order reaches Delivered
    pub processed_at: Option<i64>,
    #[serde(default)]
    pub notification: NotificationState,
    pub notification_error: Option<String>,
}

impl Order {
    /// Bare record key (without the table prefix)
    pub fn key(&self) -> String {
        self.id
            .as_ref()
            .map(|id| id.key().to_string())
            .unwrap_or_default()
    }
}

/// Creation payload (checkout lives outside this service; used by seeds and tests)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub user: RecordId,
    pub items: Vec<LineItem>,
    pub shipping: ShippingAddress,
    pub items_price: f64,
    pub tax_price: f64,
    pub shipping_price: f64,
    pub total_price: f64,
    pub is_paid: bool,
    pub status: OrderStatus,
    pub created_at: i64,
    pub processed_at: Option<i64>,
    pub notification: NotificationState,
    pub notification_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(OrderStatus::parse("Shipped"), Some(OrderStatus::Shipped));
        assert_eq!(OrderStatus::parse("delivered"), Some(OrderStatus::Delivered));
        assert_eq!(OrderStatus::parse("PROCESSING"), Some(OrderStatus::Processing));
        assert_eq!(OrderStatus::parse("cancelled"), None);
        assert_eq!(OrderStatus::parse(""), None);
    }

    #[test]
    fn test_terminal_status() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(!OrderStatus::Processing.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
    }

    #[test]
    fn test_status_stored_as_plain_string() {
        // Stored form in the database must stay stable
        assert_eq!(serde_json::to_string(&OrderStatus::Shipped).unwrap(), "\"Shipped\"");
        let parsed: OrderStatus = serde_json::from_str("\"Delivered\"").unwrap();
        assert_eq!(parsed, OrderStatus::Delivered);

        assert_eq!(
            serde_json::to_string(&NotificationState::Failed).unwrap(),
            "\"Failed\""
        );
    }
}
