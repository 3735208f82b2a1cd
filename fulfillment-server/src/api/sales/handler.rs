//! Sales API Handlers
//!
//! Each report is recomputed from the full order set on request. The queries
//! are independent and read-only; they may observe an order mid-advance
//! (read skew is accepted).

use axum::{Json, extract::State};

use crate::analytics::{
    self, CustomerRevenue, MonthlyRevenue, ProductRevenue, SalesSummary,
};
use crate::core::ServerState;
use crate::db::models::Order;
use crate::db::repository::{OrderRepository, UserRepository};
use crate::utils::{AppError, AppResult};

async fn all_orders(state: &ServerState) -> AppResult<Vec<Order>> {
    OrderRepository::new(state.db.clone())
        .fetch_all()
        .await
        .map_err(|e| AppError::database(e.to_string()))
}

/// GET /api/sales/summary - order count and total revenue
pub async fn summary(State(state): State<ServerState>) -> AppResult<Json<SalesSummary>> {
    let orders = all_orders(&state).await?;
    Ok(Json(analytics::summarize(&orders)))
}

/// GET /api/sales/customers - per-customer revenue, descending
pub async fn customers(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<CustomerRevenue>>> {
    let orders = all_orders(&state).await?;
    let names = UserRepository::new(state.db.clone())
        .display_names()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(Json(analytics::revenue_by_customer(&orders, &names)))
}

/// GET /api/sales/monthly - revenue grouped by month
pub async fn monthly(State(state): State<ServerState>) -> AppResult<Json<Vec<MonthlyRevenue>>> {
    let orders = all_orders(&state).await?;
    Ok(Json(analytics::revenue_by_month(
        &orders,
        state.config.timezone,
    )))
}

/// GET /api/sales/products - per-product revenue and share of sales
pub async fn products(State(state): State<ServerState>) -> AppResult<Json<Vec<ProductRevenue>>> {
    let orders = all_orders(&state).await?;
    Ok(Json(analytics::revenue_by_product(&orders)))
}
