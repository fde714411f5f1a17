//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Order;
use crate::db::repository::OrderRepository;
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// GET /api/orders/my - the caller's paid orders, newest first
pub async fn my_orders(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_paid_by_user(&user.id).await?;
    Ok(Json(orders))
}

/// DELETE /api/orders/{id} - delete an owned order
pub async fn delete_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let repo = OrderRepository::new(state.db.clone());
    if !repo.delete_for_user(&id, &user.id).await? {
        return Err(AppError::not_found("Order not found"));
    }
    Ok(ok_with_message((), "Order deleted successfully"))
}
