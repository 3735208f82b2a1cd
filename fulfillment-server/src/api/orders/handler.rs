//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::Order;
use crate::db::repository::OrderRepository;
use crate::utils::{AppError, AppResult};

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// List all orders (paginated, newest first)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo
        .find_all(query.limit, query.offset)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(Json(orders))
}

/// Get order by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(order))
}

/// Status transition request
#[derive(Debug, Deserialize)]
pub struct AdvanceRequest {
    pub status: String,
}

/// Advance an order to the requested status
///
/// Runs the full fulfillment pipeline: stock decrement, status persist,
/// receipt render, customer notification. A post-commit notification failure
/// returns an error while leaving the transition in place; the order's
/// notification state records the outcome either way.
pub async fn advance(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AdvanceRequest>,
) -> AppResult<Json<Order>> {
    let order = state.fulfillment().advance(&id, &payload.status).await?;
    Ok(Json(order))
}

/// Retry the customer notification without touching stock or status
pub async fn resend_notification(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.fulfillment().resend_notification(&id).await?;
    Ok(Json(order))
}
