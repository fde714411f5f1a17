//! Database Module
//!
//! Embedded SurrealDB (RocksDB backend) plus schema definition.

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "storefront";
const DATABASE: &str = "main";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database under `data_dir`
    pub async fn new(data_dir: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(data_dir)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        let service = Self { db };
        service.define_schema().await?;

        tracing::info!(data_dir, "Database connection established (SurrealDB RocksDB)");
        Ok(service)
    }

    /// Define tables and the indexes the storefront relies on:
    /// - (user, product) uniqueness on cart and wishlist
    /// - gateway order id lookup on orders
    async fn define_schema(&self) -> Result<(), AppError> {
        self.db
            .query("DEFINE INDEX IF NOT EXISTS cart_user_product ON TABLE cart_item COLUMNS user, product UNIQUE")
            .query("DEFINE INDEX IF NOT EXISTS wishlist_user_product ON TABLE wishlist_item COLUMNS user, product UNIQUE")
            .query("DEFINE INDEX IF NOT EXISTS order_gateway_order_id ON TABLE order COLUMNS gateway_order_id")
            .query("DEFINE INDEX IF NOT EXISTS order_user ON TABLE order COLUMNS user")
            .await
            .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;
        Ok(())
    }
}
