//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`orders`] - order queries and lifecycle transitions
//! - [`sales`] - sales aggregation reports

pub mod health;
pub mod orders;
pub mod sales;

use axum::Router;

use crate::core::ServerState;

/// Assemble the full API router
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .merge(sales::router())
}

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
