//! Wishlist Item Model

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_thing;

pub type WishlistItemId = Thing;

/// Wishlist entry, unique per (user, product)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistItem {
    #[serde(
        with = "serde_thing::option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub id: Option<WishlistItemId>,
    pub user: String,
    pub product: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_quantity() -> i64 {
    1
}

/// Payload for adding a product to the wishlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistItemCreate {
    pub product: String,
}

/// Payload for updating a wishlist entry quantity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistItemUpdate {
    pub quantity: i64,
}
