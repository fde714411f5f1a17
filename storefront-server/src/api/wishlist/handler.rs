//! Wishlist API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{WishlistItem, WishlistItemCreate, WishlistItemUpdate};
use crate::db::repository::WishlistRepository;
use crate::utils::validation::validate_quantity;
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// GET /api/wishlist - the caller's wishlist
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<WishlistItem>>> {
    let repo = WishlistRepository::new(state.db.clone());
    let items = repo.find_by_user(&user.id).await?;
    Ok(Json(items))
}

/// POST /api/wishlist - add a product (duplicate add is a conflict)
pub async fn add(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<WishlistItemCreate>,
) -> AppResult<Json<WishlistItem>> {
    if payload.product.trim().is_empty() {
        return Err(AppError::validation("product must not be empty"));
    }

    let repo = WishlistRepository::new(state.db.clone());
    let item = repo.add(&user.id, &payload.product).await?;
    Ok(Json(item))
}

/// PUT /api/wishlist/{id} - update an owned entry's quantity
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<WishlistItemUpdate>,
) -> AppResult<Json<WishlistItem>> {
    validate_quantity(payload.quantity, "quantity")?;

    let repo = WishlistRepository::new(state.db.clone());
    let item = repo.set_quantity(&id, &user.id, payload.quantity).await?;
    Ok(Json(item))
}

/// DELETE /api/wishlist/{id} - remove an owned entry
pub async fn remove(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let repo = WishlistRepository::new(state.db.clone());
    if !repo.delete(&id, &user.id).await? {
        return Err(AppError::not_found("Wishlist item not found"));
    }
    Ok(ok_with_message((), "Wishlist item removed"))
}
