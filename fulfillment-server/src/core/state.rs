use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::error::{Result, ServerError};
use crate::core::Config;
use crate::db::DbService;
use crate::fulfillment::{Clock, FulfillmentService, OrderLocks, SystemClock};
use crate::notify::{MailTransport, NotificationDispatcher, SmtpMailer};
use crate::receipt::ReceiptRenderer;

/// Server state - shared handles to every service
///
/// `ServerState` is cheap to clone (shallow `Arc` copies) and is handed to
/// every axum handler as router state.
///
/// # Components
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | configuration (immutable) |
/// | db | Surreal<Db> | embedded database |
/// | mailer | Arc<dyn MailTransport> | outbound email transport |
/// | clock | Arc<dyn Clock> | time source for status timestamps |
/// | order_locks | Arc<OrderLocks> | per-order mutual exclusion |
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// Outbound email transport
    pub mailer: Arc<dyn MailTransport>,
    /// Time source for status-change timestamps
    pub clock: Arc<dyn Clock>,
    /// Per-order advance locks
    pub order_locks: Arc<OrderLocks>,
}

impl ServerState {
    /// Create server state from parts (manual construction)
    ///
    /// Usually [`ServerState::initialize`] is used instead; tests build state
    /// directly with an in-memory database and a recording mail transport.
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        mailer: Arc<dyn MailTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            db,
            mailer,
            clock,
            order_locks: Arc::new(OrderLocks::new()),
        }
    }

    /// Initialize server state
    ///
    /// Order of initialization:
    /// 1. work directory structure (receipts/, database/)
    /// 2. embedded database (work_dir/database/fulfillment.db)
    /// 3. SMTP transport and system clock
    pub async fn initialize(config: &Config) -> Result<Self> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| ServerError::Config(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("fulfillment.db");
        let db_service = DbService::new(&db_path)
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        let mailer: Arc<dyn MailTransport> = Arc::new(
            SmtpMailer::new(config.smtp.clone())
                .map_err(|e| ServerError::Config(format!("SMTP transport: {e}")))?,
        );

        Ok(Self::new(
            config.clone(),
            db_service.db,
            mailer,
            Arc::new(SystemClock),
        ))
    }

    /// Get the database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Assemble the fulfillment pipeline from this state
    ///
    /// The service itself is stateless apart from the shared handles, so
    /// building one per request is cheap.
    pub fn fulfillment(&self) -> FulfillmentService {
        let renderer = ReceiptRenderer::new(
            self.config.shop.clone(),
            self.config.receipts_dir(),
            self.config.timezone,
        );
        let dispatcher = NotificationDispatcher::new(
            self.mailer.clone(),
            self.config.shop.currency_symbol.clone(),
        );
        FulfillmentService::new(
            self.db.clone(),
            renderer,
            dispatcher,
            self.clock.clone(),
            self.order_locks.clone(),
        )
    }
}
