//! Order Repository
//!
//! Orders are created in `created` status and only ever move forward
//! to `paid` or `failed`. The gateway order id gets a dedicated lookup
//! because verification comes back keyed by it, not by our id.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{Order, OrderCreate, OrderStatus};
use crate::utils::now_millis;

const TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a new order in `created` status
    pub async fn create(&self, data: OrderCreate) -> RepoResult<Order> {
        let now = now_millis();
        let order = Order {
            id: None,
            user: data.user,
            items: data.items,
            total_amount: data.total_amount,
            currency: data.currency,
            gateway_order_id: None,
            gateway_payment_id: None,
            gateway_signature: None,
            status: OrderStatus::Created,
            created_at: now,
            updated_at: now,
        };
        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let order: Option<Order> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(order)
    }

    /// Find the order holding a given gateway order id
    pub async fn find_by_gateway_order_id(&self, gateway_order_id: &str) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM order WHERE gateway_order_id = $gwid LIMIT 1")
            .bind(("gwid", gateway_order_id.to_string()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Store the gateway order id once the gateway accepts the intent
    pub async fn set_gateway_order(&self, id: &str, gateway_order_id: &str) -> RepoResult<Order> {
        let pure_id = strip_table_prefix(TABLE, id);
        let thing = make_thing(TABLE, pure_id);
        self.base
            .db()
            .query("UPDATE $thing SET gateway_order_id = $gwid, updated_at = $now")
            .bind(("thing", thing))
            .bind(("gwid", gateway_order_id.to_string()))
            .bind(("now", now_millis()))
            .await?;
        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Transition an order to `paid`, recording the gateway payment id
    /// and signature
    pub async fn mark_paid(
        &self,
        id: &str,
        gateway_payment_id: &str,
        gateway_signature: &str,
    ) -> RepoResult<Order> {
        let pure_id = strip_table_prefix(TABLE, id);
        let thing = make_thing(TABLE, pure_id);
        self.base
            .db()
            .query(
                "UPDATE $thing SET status = 'paid', gateway_payment_id = $pid, \
                 gateway_signature = $sig, updated_at = $now",
            )
            .bind(("thing", thing))
            .bind(("pid", gateway_payment_id.to_string()))
            .bind(("sig", gateway_signature.to_string()))
            .bind(("now", now_millis()))
            .await?;
        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Transition an order to `failed`
    pub async fn mark_failed(&self, id: &str) -> RepoResult<Order> {
        let pure_id = strip_table_prefix(TABLE, id);
        let thing = make_thing(TABLE, pure_id);
        self.base
            .db()
            .query("UPDATE $thing SET status = 'failed', updated_at = $now")
            .bind(("thing", thing))
            .bind(("now", now_millis()))
            .await?;
        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Every order belonging to a user, regardless of status
    pub async fn find_by_user(&self, user: &str) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE user = $user ORDER BY created_at DESC")
            .bind(("user", user.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// A user's paid orders, newest first
    pub async fn find_paid_by_user(&self, user: &str) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM order WHERE user = $user AND status = 'paid' \
                 ORDER BY created_at DESC",
            )
            .bind(("user", user.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Delete an order if it belongs to the user
    pub async fn delete_for_user(&self, id: &str, user: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id);
        let existing: Option<Order> = self.base.db().select((TABLE, pure_id)).await?;
        match existing {
            Some(order) if order.user == user => {
                let _: Option<Order> = self.base.db().delete((TABLE, pure_id)).await?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
