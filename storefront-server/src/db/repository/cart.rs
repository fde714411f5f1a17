//! Cart Repository
//!
//! Per-user cart line items, unique on (user, product). The bulk
//! `clear_user` wipe is invoked by the payment flow once an order is
//! verified paid.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::CartItem;
use crate::utils::now_millis;

const TABLE: &str = "cart_item";

#[derive(Clone)]
pub struct CartRepository {
    base: BaseRepository,
}

impl CartRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all cart items for a user, oldest first
    pub async fn find_by_user(&self, user: &str) -> RepoResult<Vec<CartItem>> {
        let items: Vec<CartItem> = self
            .base
            .db()
            .query("SELECT * FROM cart_item WHERE user = $user ORDER BY created_at ASC")
            .bind(("user", user.to_string()))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find a cart item by id, scoped to its owner
    pub async fn find_by_id_for_user(&self, id: &str, user: &str) -> RepoResult<Option<CartItem>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let item: Option<CartItem> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(item.filter(|i| i.user == user))
    }

    /// Find a user's cart entry for a specific product
    pub async fn find_by_user_and_product(
        &self,
        user: &str,
        product: &str,
    ) -> RepoResult<Option<CartItem>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM cart_item WHERE user = $user AND product = $product LIMIT 1")
            .bind(("user", user.to_string()))
            .bind(("product", product.to_string()))
            .await?;
        let items: Vec<CartItem> = result.take(0)?;
        Ok(items.into_iter().next())
    }

    /// Add a product to the cart, merging quantities if it is already there
    pub async fn add_or_merge(&self, user: &str, product: &str, quantity: i64) -> RepoResult<CartItem> {
        let now = now_millis();

        if let Some(existing) = self.find_by_user_and_product(user, product).await? {
            let id = existing
                .id
                .as_ref()
                .ok_or_else(|| RepoError::Database("Cart item missing id".to_string()))?
                .clone();
            let merged = existing.quantity + quantity;
            self.base
                .db()
                .query("UPDATE $thing SET quantity = $quantity, updated_at = $now")
                .bind(("thing", id))
                .bind(("quantity", merged))
                .bind(("now", now))
                .await?;
            return self
                .find_by_user_and_product(user, product)
                .await?
                .ok_or_else(|| RepoError::Database("Cart item vanished during merge".to_string()));
        }

        let item = CartItem {
            id: None,
            user: user.to_string(),
            product: product.to_string(),
            quantity,
            created_at: now,
            updated_at: now,
        };
        let created: Option<CartItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create cart item".to_string()))
    }

    /// Set the quantity of an owned cart item
    pub async fn set_quantity(&self, id: &str, user: &str, quantity: i64) -> RepoResult<CartItem> {
        let pure_id = strip_table_prefix(TABLE, id);
        let existing = self
            .find_by_id_for_user(pure_id, user)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Cart item {} not found", id)))?;

        let thing = make_thing(TABLE, pure_id);
        self.base
            .db()
            .query("UPDATE $thing SET quantity = $quantity, updated_at = $now")
            .bind(("thing", thing))
            .bind(("quantity", quantity))
            .bind(("now", now_millis()))
            .await?;

        self.find_by_id_for_user(pure_id, user)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Cart item {} not found", existing.product)))
    }

    /// Remove an owned cart item
    pub async fn delete(&self, id: &str, user: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id);
        if self.find_by_id_for_user(pure_id, user).await?.is_none() {
            return Ok(false);
        }
        let _: Option<CartItem> = self.base.db().delete((TABLE, pure_id)).await?;
        Ok(true)
    }

    /// Delete every cart item for a user. Not an error if the cart is
    /// already empty.
    pub async fn clear_user(&self, user: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE cart_item WHERE user = $user")
            .bind(("user", user.to_string()))
            .await?;
        Ok(())
    }
}
