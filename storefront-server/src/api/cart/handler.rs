//! Cart API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{CartItem, CartItemCreate, CartItemUpdate};
use crate::db::repository::CartRepository;
use crate::utils::validation::validate_quantity;
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// GET /api/cart - the caller's cart items
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<CartItem>>> {
    let repo = CartRepository::new(state.db.clone());
    let items = repo.find_by_user(&user.id).await?;
    Ok(Json(items))
}

/// POST /api/cart - add a product, merging quantity if already present
pub async fn add(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CartItemCreate>,
) -> AppResult<Json<CartItem>> {
    if payload.product.trim().is_empty() {
        return Err(AppError::validation("product must not be empty"));
    }
    validate_quantity(payload.quantity, "quantity")?;

    let repo = CartRepository::new(state.db.clone());
    let item = repo
        .add_or_merge(&user.id, &payload.product, payload.quantity)
        .await?;
    Ok(Json(item))
}

/// PUT /api/cart/{id} - set the quantity of an owned cart item
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<CartItemUpdate>,
) -> AppResult<Json<CartItem>> {
    validate_quantity(payload.quantity, "quantity")?;

    let repo = CartRepository::new(state.db.clone());
    let item = repo.set_quantity(&id, &user.id, payload.quantity).await?;
    Ok(Json(item))
}

/// DELETE /api/cart/{id} - remove an owned cart item
pub async fn remove(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let repo = CartRepository::new(state.db.clone());
    if !repo.delete(&id, &user.id).await? {
        return Err(AppError::not_found("Cart item not found"));
    }
    Ok(ok_with_message((), "Cart item removed"))
}
