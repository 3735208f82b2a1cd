//! Sales API Module
//!
//! Read-only aggregation reports over the persisted order set.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Sales router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/sales", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/summary", get(handler::summary))
        .route("/customers", get(handler::customers))
        .route("/monthly", get(handler::monthly))
        .route("/products", get(handler::products))
}
