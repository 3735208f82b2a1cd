//! Fulfillment Server - order fulfillment and sales-aggregation service
//!
//! # Architecture Overview
//!
//! This crate advances shop orders through their lifecycle and keeps the
//! surrounding bookkeeping consistent:
//!
//! - **Fulfillment** (`fulfillment`): status transitions, stock reconciliation
//! - **Receipts** (`receipt`): fixed-layout paginated receipt documents
//! - **Notifications** (`notify`): customer emails with the receipt attached
//! - **Analytics** (`analytics`): cross-order sales aggregation
//! - **HTTP API** (`api`): RESTful API surface
//!
//! # Module Structure
//!
//! ```text
//! fulfillment-server/src/
//! ├── core/          # config, state, server, errors
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # embedded SurrealDB storage + repositories
//! ├── fulfillment/   # order lifecycle orchestration
//! ├── receipt/       # receipt rendering and artifacts
//! ├── notify/        # email composition and SMTP transport
//! ├── analytics/     # sales aggregation queries
//! └── utils/         # errors, logging, money, time helpers
//! ```

pub mod analytics;
pub mod api;
pub mod core;
pub mod db;
pub mod fulfillment;
pub mod notify;
pub mod receipt;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use fulfillment::{FulfillmentError, FulfillmentService};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ______      ________ ____
   / ____/_  __/ / __(_) / /
  / /_  / / / / / /_/ / / /
 / __/ / /_/ / / __/ / / /
/_/    \__,_/_/_/ /_/_/_/
    "#
    );
}
