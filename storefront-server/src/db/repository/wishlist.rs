//! Wishlist Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::WishlistItem;
use crate::utils::now_millis;

const TABLE: &str = "wishlist_item";

#[derive(Clone)]
pub struct WishlistRepository {
    base: BaseRepository,
}

impl WishlistRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all wishlist items for a user, oldest first
    pub async fn find_by_user(&self, user: &str) -> RepoResult<Vec<WishlistItem>> {
        let items: Vec<WishlistItem> = self
            .base
            .db()
            .query("SELECT * FROM wishlist_item WHERE user = $user ORDER BY created_at ASC")
            .bind(("user", user.to_string()))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find a wishlist item by id, scoped to its owner
    pub async fn find_by_id_for_user(
        &self,
        id: &str,
        user: &str,
    ) -> RepoResult<Option<WishlistItem>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let item: Option<WishlistItem> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(item.filter(|i| i.user == user))
    }

    /// Add a product to the wishlist. Adding a product twice is a
    /// Duplicate error.
    pub async fn add(&self, user: &str, product: &str) -> RepoResult<WishlistItem> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM wishlist_item WHERE user = $user AND product = $product LIMIT 1")
            .bind(("user", user.to_string()))
            .bind(("product", product.to_string()))
            .await?;
        let existing: Vec<WishlistItem> = result.take(0)?;
        if !existing.is_empty() {
            return Err(RepoError::Duplicate(
                "Product already in wishlist".to_string(),
            ));
        }

        let now = now_millis();
        let item = WishlistItem {
            id: None,
            user: user.to_string(),
            product: product.to_string(),
            quantity: 1,
            created_at: now,
            updated_at: now,
        };
        let created: Option<WishlistItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create wishlist item".to_string()))
    }

    /// Set the quantity of an owned wishlist entry
    pub async fn set_quantity(
        &self,
        id: &str,
        user: &str,
        quantity: i64,
    ) -> RepoResult<WishlistItem> {
        let pure_id = strip_table_prefix(TABLE, id);
        if self.find_by_id_for_user(pure_id, user).await?.is_none() {
            return Err(RepoError::NotFound(format!(
                "Wishlist item {} not found",
                id
            )));
        }

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
            .ok_or_else(|| RepoError::NotFound(format!("Wishlist item {} not found", id)))
    }

    /// Remove an owned wishlist entry
    pub async fn delete(&self, id: &str, user: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id);
        if self.find_by_id_for_user(pure_id, user).await?.is_none() {
            return Ok(false);
        }
        let _: Option<WishlistItem> = self.base.db().delete((TABLE, pure_id)).await?;
        Ok(true)
    }
}
