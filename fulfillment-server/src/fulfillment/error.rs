//! Fulfillment error taxonomy

use thiserror::Error;

use crate::db::repository::RepoError;
use crate::utils::AppError;

/// Errors surfaced by the fulfillment pipeline
///
/// `OrderNotFound`, `AlreadyTerminal`, `ProductNotFound` and `InvalidStatus`
/// are checked before the order is mutated and abort cleanly.
/// `ReceiptRender` and `NotificationSend` occur after the status change has
/// been committed; they are reported to the caller and recorded on the order's
/// notification state, but the transition is not rolled back.
#[derive(Debug, Error)]
pub enum FulfillmentError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Order {0} is already delivered")]
    AlreadyTerminal(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Invalid order status: {0}")]
    InvalidStatus(String),

    #[error("Receipt rendering failed: {0}")]
    ReceiptRender(String),

    #[error("Notification delivery failed: {0}")]
    NotificationSend(String),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<FulfillmentError> for AppError {
    fn from(err: FulfillmentError) -> Self {
        match err {
            FulfillmentError::OrderNotFound(_) | FulfillmentError::ProductNotFound(_) => {
                AppError::not_found(err.to_string())
            }
            FulfillmentError::AlreadyTerminal(_) => AppError::business_rule(err.to_string()),
            FulfillmentError::InvalidStatus(_) => AppError::validation(err.to_string()),
            FulfillmentError::ReceiptRender(_) | FulfillmentError::NotificationSend(_) => {
                AppError::internal(err.to_string())
            }
            FulfillmentError::Repo(RepoError::NotFound(msg)) => AppError::not_found(msg),
            FulfillmentError::Repo(RepoError::Database(msg)) => AppError::database(msg),
        }
    }
}
