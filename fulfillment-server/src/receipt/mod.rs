//! Receipt rendering
//!
//! Renders an order into a fixed-layout paginated text document and writes it
//! to a transient file owned by the fulfillment call.

mod artifact;
mod layout;

pub use artifact::{ReceiptArtifact, receipt_filename};
pub use layout::PageComposer;

use std::path::PathBuf;

use chrono_tz::Tz;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::core::ShopConfig;
use crate::db::models::{Order, User};
use crate::utils::money::{format_currency, to_decimal, to_f64};
use crate::utils::time::format_datetime;

/// Page grid: 72 columns by 64 rows
pub const PAGE_WIDTH: usize = 72;
pub const PAGE_HEIGHT: usize = 64;

/// Item rows reflow to a new page when fewer rows than this remain
const BOTTOM_MARGIN_ROWS: usize = 6;

/// Receipt rendering failure
#[derive(Debug, Error)]
pub enum ReceiptRenderError {
    #[error("Failed to write receipt artifact: {0}")]
    Io(#[from] std::io::Error),
}

/// Receipt renderer
///
/// Layout contract: header band with shop identity and the "ORDER RECEIPT"
/// title, order metadata, customer and shipping blocks, an itemized table,
/// a totals block taken verbatim from the order's stored price breakdown,
/// and a fixed footer.
pub struct ReceiptRenderer {
    shop: ShopConfig,
    out_dir: PathBuf,
    timezone: Tz,
}

impl ReceiptRenderer {
    pub fn new(shop: ShopConfig, out_dir: PathBuf, timezone: Tz) -> Self {
        Self {
            shop,
            out_dir,
            timezone,
        }
    }

    /// Render the order to a transient file and hand back the artifact
    ///
    /// On a write failure nothing is left behind for the caller to attach.
    pub fn render(&self, order: &Order, customer: &User) -> Result<ReceiptArtifact, ReceiptRenderError> {
        let document = self.compose(order, customer);

        std::fs::create_dir_all(&self.out_dir)?;
        let filename = receipt_filename(&order.key());
        let path = self.out_dir.join(&filename);

        if let Err(e) = std::fs::write(&path, document) {
            let _ = std::fs::remove_file(&path);
            return Err(ReceiptRenderError::Io(e));
        }

        tracing::debug!(path = %path.display(), "Receipt rendered");
        Ok(ReceiptArtifact::new(path, filename))
    }

    fn compose(&self, order: &Order, customer: &User) -> String {
        let mut c = PageComposer::new(PAGE_WIDTH, PAGE_HEIGHT);

        // Header band
        c.sep_double();
        c.center(&self.shop.name);
        c.center("ORDER RECEIPT");
        c.sep_double();
        c.blank();

        // Order metadata
        c.line_lr("Order:", &order.key());
        c.line_lr("Date:", &format_datetime(order.created_at, self.timezone));
        c.line_lr("Status:", order.status.as_str());
        c.line_lr("Payment:", if order.is_paid { "PAID" } else { "UNPAID" });
        c.blank();

        // Customer
        c.line("CUSTOMER");
        c.sep_single();
        c.line(&customer.name);
        c.line(&customer.email);
        c.blank();

        // Shipping
        c.line("SHIP TO");
        c.sep_single();
        c.line(&order.shipping.address);
        c.line(&format!("{} {}", order.shipping.city, order.shipping.postal_code));
        c.line(&order.shipping.country);
        c.line(&order.shipping.phone);
        c.blank();

        // Itemized table
        self.table_header(&mut c);
        for item in &order.items {
            if c.rows_remaining() < BOTTOM_MARGIN_ROWS {
                c.break_page();
                self.table_header(&mut c);
            }
            let subtotal = to_f64(to_decimal(item.price) * Decimal::from(item.quantity));
            c.line(&format!(
                "{:<38}{:>6}{:>13}{:>15}",
                truncate(&item.name, 38),
                item.quantity,
                format_currency(item.price, &self.shop.currency_symbol),
                format_currency(subtotal, &self.shop.currency_symbol),
            ));
        }
        c.sep_single();
        c.blank();

        // Totals: stored breakdown, never recomputed here
        c.ensure_room(8);
        let sym = &self.shop.currency_symbol;
        c.line_lr("Items:", &format_currency(order.items_price, sym));
        c.line_lr("Tax:", &format_currency(order.tax_price, sym));
        c.line_lr("Shipping:", &format_currency(order.shipping_price, sym));
        c.sep_double();
        c.line_lr("TOTAL", &format_currency(order.total_price, sym));
        c.sep_double();
        c.blank();

        // Footer
        c.center("Thank you for shopping with us!");
        c.center(&format!("Questions? Contact {}", self.shop.contact_email));

        c.finish()
    }

    fn table_header(&self, c: &mut PageComposer) {
        c.line(&format!(
            "{:<38}{:>6}{:>13}{:>15}",
            "ITEM", "QTY", "PRICE", "SUBTOTAL"
        ));
        c.sep_single();
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max - 1).chain(std::iter::once('…')).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{LineItem, NotificationState, Order, OrderStatus, ShippingAddress};
    use surrealdb::RecordId;

    fn shop() -> ShopConfig {
        ShopConfig {
            name: "Riverstone Goods".to_string(),
            contact_email: "support@riverstone.example".to_string(),
            currency_symbol: "$".to_string(),
        }
    }

    fn customer() -> User {
        User {
            id: Some(RecordId::from_table_key("user", "alice")),
            name: "Alice Carter".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    fn order_with_items(items: Vec<LineItem>) -> Order {
        Order {
            id: Some(RecordId::from_table_key("order", "ord1")),
            user: RecordId::from_table_key("user", "alice"),
            items,
            shipping: ShippingAddress {
                address: "12 Harbor Lane".to_string(),
                city: "Valencia".to_string(),
                postal_code: "46001".to_string(),
                country: "Spain".to_string(),
                phone: "+34 600 000 000".to_string(),
            },
            items_price: 200.0,
            tax_price: 21.0,
            shipping_price: 4.5,
            total_price: 225.5,
            is_paid: true,
            status: OrderStatus::Shipped,
            created_at: 1705912335000,
            processed_at: None,
            notification: NotificationState::Pending,
            notification_error: None,
        }
    }

    fn line_item(name: &str, price: f64, quantity: i32) -> LineItem {
        LineItem {
            product: RecordId::from_table_key("product", "p1"),
            name: name.to_string(),
            price,
            quantity,
            image: String::new(),
        }
    }

    #[test]
    fn test_render_contains_fixed_layout_blocks() {
        let tmp = tempfile::tempdir().unwrap();
        let renderer = ReceiptRenderer::new(shop(), tmp.path().to_path_buf(), chrono_tz::UTC);

        let order = order_with_items(vec![line_item("Canvas Backpack", 100.0, 2)]);
        let artifact = renderer.render(&order, &customer()).unwrap();

        let text = std::fs::read_to_string(artifact.path()).unwrap();
        assert!(text.contains("Riverstone Goods"));
        assert!(text.contains("ORDER RECEIPT"));
        assert!(text.contains("ord1"));
        assert!(text.contains("Alice Carter"));
        assert!(text.contains("alice@example.com"));
        assert!(text.contains("12 Harbor Lane"));
        assert!(text.contains("Canvas Backpack"));
        assert!(text.contains("$200.00")); // 100.0 x 2 line subtotal
        assert!(text.contains("Thank you for shopping with us!"));
    }

    #[test]
    fn test_totals_come_from_stored_breakdown() {
        let tmp = tempfile::tempdir().unwrap();
        let renderer = ReceiptRenderer::new(shop(), tmp.path().to_path_buf(), chrono_tz::UTC);

        // Stored breakdown deliberately disagrees with the line items; the
        // receipt must show the stored values untouched.
        let mut order = order_with_items(vec![line_item("Mug", 3.0, 1)]);
        order.items_price = 1234567.5;
        order.tax_price = 99.99;
        order.shipping_price = 0.0;
        order.total_price = 1234667.49;

        let artifact = renderer.render(&order, &customer()).unwrap();
        let text = std::fs::read_to_string(artifact.path()).unwrap();

        assert!(text.contains("$1,234,567.50"));
        assert!(text.contains("$99.99"));
        assert!(text.contains("$1,234,667.49"));
    }

    #[test]
    fn test_long_item_list_reflows_to_second_page() {
        let tmp = tempfile::tempdir().unwrap();
        let renderer = ReceiptRenderer::new(shop(), tmp.path().to_path_buf(), chrono_tz::UTC);

        let items: Vec<LineItem> = (0..80)
            .map(|i| line_item(&format!("Item {}", i), 1.0, 1))
            .collect();
        let order = order_with_items(items);

        let artifact = renderer.render(&order, &customer()).unwrap();
        let text = std::fs::read_to_string(artifact.path()).unwrap();

        assert!(text.contains('\u{0C}'), "expected a page break");
        // Each page of the item table repeats the column header
        assert!(text.matches("SUBTOTAL").count() >= 2);
    }

    #[test]
    fn test_artifact_discard_removes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let renderer = ReceiptRenderer::new(shop(), tmp.path().to_path_buf(), chrono_tz::UTC);

        let order = order_with_items(vec![line_item("Mug", 3.0, 1)]);
        let artifact = renderer.render(&order, &customer()).unwrap();

        let path = artifact.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(artifact.filename(), "receipt-ord1.txt");

        artifact.discard();
        assert!(!path.exists());
    }
}
