//! Order API Module
//!
//! Read access to orders plus the two fulfillment entry points: the status
//! transition and the notification-only resend.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        // Lifecycle transition (fulfillment pipeline)
        .route("/{id}/status", put(handler::advance))
        // Notification-only retry after a failed receipt email
        .route("/{id}/notification", post(handler::resend_notification))
}
