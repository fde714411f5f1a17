//! Cart Item Model
//!
//! One row per (user, product) pair, enforced by a unique index.
//! Adding an existing product merges quantities.

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_thing;

pub type CartItemId = Thing;

/// Cart line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(
        with = "serde_thing::option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub id: Option<CartItemId>,
    /// Owning user id (JWT subject)
    pub user: String,
    /// Product record id as "product:key"
    pub product: String,
    pub quantity: i64,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Payload for adding a product to the cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemCreate {
    pub product: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

/// Payload for setting a cart item quantity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemUpdate {
    pub quantity: i64,
}
