//! Address Repository
//!
//! Owner-scoped CRUD. Setting `is_primary` on one address unsets it on
//! every other address of the same user.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{Address, AddressCreate, AddressUpdate};
use crate::utils::now_millis;

const TABLE: &str = "address";

#[derive(Clone)]
pub struct AddressRepository {
    base: BaseRepository,
}

impl AddressRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all addresses for a user
    pub async fn find_by_user(&self, user: &str) -> RepoResult<Vec<Address>> {
        let addresses: Vec<Address> = self
            .base
            .db()
            .query("SELECT * FROM address WHERE user = $user ORDER BY created_at ASC")
            .bind(("user", user.to_string()))
            .await?
            .take(0)?;
        Ok(addresses)
    }

    /// Find an address by id, scoped to its owner
    pub async fn find_by_id_for_user(&self, id: &str, user: &str) -> RepoResult<Option<Address>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let address: Option<Address> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(address.filter(|a| a.user == user))
    }

    /// Create a new address for a user
    pub async fn create(&self, user: &str, data: AddressCreate) -> RepoResult<Address> {
        let now = now_millis();
        let address = Address {
            id: None,
            user: user.to_string(),
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            address: data.address,
            pincode: data.pincode,
            city: data.city,
            state: data.state,
            phone_number: data.phone_number,
            is_primary: false,
            created_at: now,
            updated_at: now,
        };
        let created: Option<Address> = self.base.db().create(TABLE).content(address).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create address".to_string()))
    }

    /// Update an owned address. Promoting to primary demotes the user's
    /// other addresses in the same call.
    pub async fn update(&self, id: &str, user: &str, data: AddressUpdate) -> RepoResult<Address> {
        let pure_id = strip_table_prefix(TABLE, id);
        if self.find_by_id_for_user(pure_id, user).await?.is_none() {
            return Err(RepoError::NotFound(format!("Address {} not found", id)));
        }

        let promote = data.is_primary == Some(true);
        let thing = make_thing(TABLE, pure_id);
        let mut query = self
            .base
            .db()
            .query("UPDATE $thing MERGE $data")
            .query("UPDATE $thing SET updated_at = $now");
        if promote {
            query = query
                .query("UPDATE address SET is_primary = false WHERE user = $user AND id != $thing");
        }
        query
            .bind(("thing", thing))
            .bind(("data", data))
            .bind(("now", now_millis()))
            .bind(("user", user.to_string()))
            .await?;

        self.find_by_id_for_user(pure_id, user)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Address {} not found", id)))
    }

    /// Delete an owned address
    pub async fn delete(&self, id: &str, user: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id);
        if self.find_by_id_for_user(pure_id, user).await?.is_none() {
            return Ok(false);
        }
        let _: Option<Address> = self.base.db().delete((TABLE, pure_id)).await?;
        Ok(true)
    }
}
