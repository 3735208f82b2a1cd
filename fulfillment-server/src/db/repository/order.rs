//! Order Repository
//!
//! Orders are created at checkout (outside this service) and mutated here
//! only by the fulfillment pipeline: status transitions and notification
//! bookkeeping.

use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{NotificationState, Order, OrderCreate, OrderStatus};

pub const ORDER_TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

/// Narrow merge applied on a status transition
#[derive(Debug, Serialize)]
struct StatusPatch {
    status: OrderStatus,
    processed_at: i64,
    notification: NotificationState,
    notification_error: Option<String>,
}

/// Narrow merge applied after a notification attempt
#[derive(Debug, Serialize)]
struct NotificationPatch {
    notification: NotificationState,
    notification_error: Option<String>,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn record_id(key: &str) -> RecordId {
        RecordId::from_table_key(ORDER_TABLE, key)
    }

    pub async fn find_by_id(&self, key: &str) -> RepoResult<Option<Order>> {
        let order: Option<Order> = self.base.db().select(Self::record_id(key)).await?;
        Ok(order)
    }

    /// List orders, newest first
    pub async fn find_all(&self, limit: i64, offset: i64) -> RepoResult<Vec<Order>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM type::table($table) ORDER BY created_at DESC LIMIT $limit START $offset")
            .bind(("table", ORDER_TABLE))
            .bind(("limit", limit))
            .bind(("offset", offset))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders)
    }

    /// Fetch the complete order set (sales aggregation)
    pub async fn fetch_all(&self) -> RepoResult<Vec<Order>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM type::table($table)")
            .bind(("table", ORDER_TABLE))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders)
    }

    /// Create an order (seeds and tests; checkout is an external concern)
    pub async fn create(&self, key: Option<&str>, data: OrderCreate) -> RepoResult<Order> {
        let created: Option<Order> = match key {
            Some(k) => {
                self.base
                    .db()
                    .create((ORDER_TABLE, k.to_string()))
                    .content(data)
                    .await?
            }
            None => self.base.db().create(ORDER_TABLE).content(data).await?,
        };
        created.ok_or_else(|| RepoError::Database("Order create returned no record".to_string()))
    }

    /// Persist a status transition
    ///
    /// Stamps `processed_at` and resets the notification state to Pending; the
    /// pipeline records the outcome via [`Self::mark_notification`].
    pub async fn mark_status(
        &self,
        key: &str,
        status: OrderStatus,
        processed_at: i64,
    ) -> RepoResult<Order> {
        let updated: Option<Order> = self
            .base
            .db()
            .update(Self::record_id(key))
            .merge(StatusPatch {
                status,
                processed_at,
                notification: NotificationState::Pending,
                notification_error: None,
            })
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", key)))
    }

    /// Record the outcome of a notification attempt
    pub async fn mark_notification(
        &self,
        key: &str,
        state: NotificationState,
        error: Option<String>,
    ) -> RepoResult<Order> {
        let updated: Option<Order> = self
            .base
            .db()
            .update(Self::record_id(key))
            .merge(NotificationPatch {
                notification: state,
                notification_error: error,
            })
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", key)))
    }
}
