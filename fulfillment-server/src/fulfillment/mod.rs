//! Order fulfillment pipeline
//!
//! Advances an order through its lifecycle: validates the transition,
//! reconciles inventory, persists the new status, renders the receipt,
//! notifies the customer and discards the transient receipt artifact.
//!
//! Failure ordering is deliberate: everything before the status write aborts
//! cleanly; rendering or notification failures after the write are recorded
//! on the order's notification state and surfaced to the caller, who may
//! retry notification-only via [`FulfillmentService::resend_notification`].

pub mod clock;
pub mod error;
pub mod locks;
pub mod stock;


pub use clock::{Clock, SystemClock};
pub use error::FulfillmentError;
pub use locks::OrderLocks;
pub use stock::StockLedger;

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{NotificationState, Order, OrderStatus};
use crate::db::repository::{OrderRepository, RepoError, UserRepository};
use crate::notify::NotificationDispatcher;
use crate::receipt::ReceiptRenderer;

/// Order lifecycle orchestrator
pub struct FulfillmentService {
    orders: OrderRepository,
    users: UserRepository,
    ledger: StockLedger,
    renderer: ReceiptRenderer,
    dispatcher: NotificationDispatcher,
    clock: Arc<dyn Clock>,
    locks: Arc<OrderLocks>,
}

impl FulfillmentService {
    pub fn new(
        db: Surreal<Db>,
        renderer: ReceiptRenderer,
        dispatcher: NotificationDispatcher,
        clock: Arc<dyn Clock>,
        locks: Arc<OrderLocks>,
    ) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            users: UserRepository::new(db.clone()),
            ledger: StockLedger::new(db),
            renderer,
            dispatcher,
            clock,
            locks,
        }
    }

    /// Advance an order to the requested status
    ///
    /// Steps, each gated on the previous one succeeding:
    /// 1. decrement stock for every line item
    /// 2. persist the new status + status-change timestamp
    /// 3. render the receipt
    /// 4. dispatch the notification with the receipt attached
    /// 5. discard the receipt artifact (unconditionally)
    pub async fn advance(
        &self,
        order_id: &str,
        requested: &str,
    ) -> Result<Order, FulfillmentError> {
        let requested = OrderStatus::parse(requested)
            .ok_or_else(|| FulfillmentError::InvalidStatus(requested.to_string()))?;

        let _guard = self.locks.acquire(order_id).await;

        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| FulfillmentError::OrderNotFound(order_id.to_string()))?;

        // Delivered is terminal, whatever the requested status
        if order.status.is_terminal() {
            return Err(FulfillmentError::AlreadyTerminal(order_id.to_string()));
        }

        for item in &order.items {
            self.ledger
                .decrement(&item.product, item.quantity as i64)
                .await?;
        }

        let now = self.clock.now_millis();
        let order = self.orders.mark_status(order_id, requested, now).await?;

        tracing::info!(
            order = %order_id,
            status = %requested,
            processed_at = now,
            "Order status advanced"
        );

        self.notify_with_receipt(order_id, order).await
    }

    /// Notification-only retry
    ///
    /// Re-renders the receipt and re-dispatches the email for an order whose
    /// earlier notification attempt failed. Idempotent; touches neither stock
    /// nor status.
    pub async fn resend_notification(&self, order_id: &str) -> Result<Order, FulfillmentError> {
        let _guard = self.locks.acquire(order_id).await;

        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| FulfillmentError::OrderNotFound(order_id.to_string()))?;

        self.notify_with_receipt(order_id, order).await
    }

    /// Render, dispatch, discard; record the outcome on the order
    async fn notify_with_receipt(
        &self,
        order_id: &str,
        order: Order,
    ) -> Result<Order, FulfillmentError> {
        let customer = self
            .users
            .find_by_record(&order.user)
            .await?
            .ok_or_else(|| {
                FulfillmentError::Repo(RepoError::NotFound(format!(
                    "Customer {} not found",
                    order.user
                )))
            })?;

        let artifact = match self.renderer.render(&order, &customer) {
            Ok(artifact) => artifact,
            Err(e) => {
                self.orders
                    .mark_notification(order_id, NotificationState::Failed, Some(e.to_string()))
                    .await?;
                return Err(FulfillmentError::ReceiptRender(e.to_string()));
            }
        };

        let outcome = self.dispatcher.notify(&order, &customer, &artifact).await;

        // The artifact is scoped to this call: discarded whether the
        // dispatch succeeded or not.
        artifact.discard();

        match outcome {
            Ok(()) => {
                let order = self
                    .orders
                    .mark_notification(order_id, NotificationState::Sent, None)
                    .await?;
                Ok(order)
            }
            Err(e) => {
                self.orders
                    .mark_notification(order_id, NotificationState::Failed, Some(e.to_string()))
                    .await?;
                Err(FulfillmentError::NotificationSend(e.to_string()))
            }
        }
    }
}
