//! Customer notifications
//!
//! Composes the status-change email (HTML summary plus the receipt as an
//! attachment) and hands it to the outbound mail transport. Delivery
//! internals and retries belong to the transport side, not here.

mod smtp;

pub use smtp::SmtpMailer;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::db::models::{Order, User};
use crate::receipt::ReceiptArtifact;
use crate::utils::money::format_currency;

/// Mail transport failure
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid email address: {0}")]
    Address(String),

    #[error("Failed to build email: {0}")]
    Build(String),

    #[error("Failed to send email: {0}")]
    Send(String),
}

/// File attached to an outbound email
#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub path: PathBuf,
}

/// Outbound email contract: recipient, subject, HTML body, attachments
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub attachments: Vec<EmailAttachment>,
}

/// Outbound email transport collaborator
///
/// Production uses [`SmtpMailer`]; tests substitute a recording transport.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError>;
}

/// Notification dispatcher
///
/// Builds the status-change message for an order and delegates delivery.
pub struct NotificationDispatcher {
    transport: Arc<dyn MailTransport>,
    currency_symbol: String,
}

impl NotificationDispatcher {
    pub fn new(transport: Arc<dyn MailTransport>, currency_symbol: String) -> Self {
        Self {
            transport,
            currency_symbol,
        }
    }

    /// Send the status-change notification with the receipt attached
    pub async fn notify(
        &self,
        order: &Order,
        customer: &User,
        artifact: &ReceiptArtifact,
    ) -> Result<(), MailError> {
        let email = OutboundEmail {
            to: customer.email.clone(),
            subject: subject_for(order),
            html_body: self.build_html_body(order, customer),
            attachments: vec![EmailAttachment {
                filename: artifact.filename().to_string(),
                path: artifact.path().to_path_buf(),
            }],
        };

        tracing::info!(
            order = %order.key(),
            to = %email.to,
            status = %order.status,
            "Dispatching order notification"
        );
        self.transport.send(email).await
    }

    /// HTML summary of the updated status plus an item/totals table
    ///
    /// Reproduces the same stored numbers as the receipt, independently laid
    /// out for the email body.
    fn build_html_body(&self, order: &Order, customer: &User) -> String {
        let sym = &self.currency_symbol;

        let mut rows = String::new();
        for item in &order.items {
            let subtotal = item.price * item.quantity as f64;
            rows.push_str(&format!(
                "<tr><td>{}</td><td align=\"right\">{}</td>\
                 <td align=\"right\">{}</td><td align=\"right\">{}</td></tr>\n",
                item.name,
                item.quantity,
                format_currency(item.price, sym),
                format_currency(subtotal, sym),
            ));
        }

        format!(
            r#"<html>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Hi {name},</h2>
    <p>Your order <strong>{id}</strong> is now <strong>{status}</strong>.</p>
    <table width="100%" cellpadding="4" cellspacing="0" border="1">
      <tr><th align="left">Item</th><th align="right">Qty</th><th align="right">Price</th><th align="right">Subtotal</th></tr>
{rows}    </table>
    <p>
      Items: {items}<br>
      Tax: {tax}<br>
      Shipping: {shipping}<br>
      <strong>Total: {total}</strong>
    </p>
    <p style="color: #666; font-size: 14px;">
      Your receipt is attached to this email.
    </p>
  </div>
</body>
</html>
"#,
            name = customer.name,
            id = order.key(),
            status = order.status,
            rows = rows,
            items = format_currency(order.items_price, sym),
            tax = format_currency(order.tax_price, sym),
            shipping = format_currency(order.shipping_price, sym),
            total = format_currency(order.total_price, sym),
        )
    }
}

/// Subject line encoding the order id and the new status
pub fn subject_for(order: &Order) -> String {
    format!("Your order {} is now {}", order.key(), order.status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{LineItem, NotificationState, OrderStatus, ShippingAddress};
    use std::sync::Mutex;
    use surrealdb::RecordId;

    struct RecordingTransport {
        sent: Mutex<Vec<OutboundEmail>>,
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
            self.sent.lock().unwrap().push(email);
            Ok(())
        }
    }

    fn sample_order() -> Order {
        Order {
            id: Some(RecordId::from_table_key("order", "ord9")),
            user: RecordId::from_table_key("user", "bob"),
            items: vec![LineItem {
                product: RecordId::from_table_key("product", "p1"),
                name: "Trail Bottle".to_string(),
                price: 12.5,
                quantity: 4,
                image: String::new(),
            }],
            shipping: ShippingAddress {
                address: "8 Pine St".to_string(),
                city: "Madrid".to_string(),
                postal_code: "28001".to_string(),
                country: "Spain".to_string(),
                phone: "+34 600 111 222".to_string(),
            },
            items_price: 50.0,
            tax_price: 10.5,
            shipping_price: 0.0,
            total_price: 60.5,
            is_paid: true,
            status: OrderStatus::Delivered,
            created_at: 1705912335000,
            processed_at: Some(1705998735000),
            notification: NotificationState::Pending,
            notification_error: None,
        }
    }

    fn sample_customer() -> User {
        User {
            id: Some(RecordId::from_table_key("user", "bob")),
            name: "Bob Reyes".to_string(),
            email: "bob@example.com".to_string(),
        }
    }

    #[test]
    fn test_subject_encodes_id_and_status() {
        let subject = subject_for(&sample_order());
        assert!(subject.contains("ord9"));
        assert!(subject.contains("Delivered"));
    }

    #[tokio::test]
    async fn test_notify_composes_message_with_attachment() {
        let transport = Arc::new(RecordingTransport {
            sent: Mutex::new(Vec::new()),
        });
        let dispatcher = NotificationDispatcher::new(transport.clone(), "$".to_string());

        let artifact = ReceiptArtifact::new(
            std::path::PathBuf::from("/tmp/receipt-ord9.txt"),
            "receipt-ord9.txt".to_string(),
        );

        dispatcher
            .notify(&sample_order(), &sample_customer(), &artifact)
            .await
            .unwrap();

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let email = &sent[0];
        assert_eq!(email.to, "bob@example.com");
        assert_eq!(email.attachments.len(), 1);
        assert_eq!(email.attachments[0].filename, "receipt-ord9.txt");
        // Body carries the item table and the stored totals
        assert!(email.html_body.contains("Trail Bottle"));
        assert!(email.html_body.contains("$50.00")); // line subtotal and items price
        assert!(email.html_body.contains("$60.50"));
        assert!(email.html_body.contains("Delivered"));
    }
}
