//! Server state
//!
//! Holds singleton references to every service a handler can reach.

use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::payments::{PaymentFlow, PaymentGateway, RazorpayGateway};
use crate::utils::{AppError, AppResult};

/// Server state - cheaply cloneable handle shared across requests
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: Surreal<Db>,
    jwt_service: Arc<JwtService>,
    gateway: Arc<dyn PaymentGateway>,
}

impl ServerState {
    /// Initialize all services from configuration
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db_service = DbService::new(&config.data_dir).await?;
        let gateway = RazorpayGateway::new(&config.gateway)
            .map_err(|e| AppError::internal(format!("Failed to build gateway client: {e}")))?;

        Ok(Self::with_parts(
            config.clone(),
            db_service.db,
            Arc::new(gateway),
        ))
    }

    /// Assemble state from already-built parts (tests swap in a mock
    /// gateway and a throwaway database here)
    pub fn with_parts(config: Config, db: Surreal<Db>, gateway: Arc<dyn PaymentGateway>) -> Self {
        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));
        Self {
            config: Arc::new(config),
            db,
            jwt_service,
            gateway,
        }
    }

    /// JWT validation service
    pub fn jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Build the payment flow against the current db/gateway/secret
    pub fn payment_flow(&self) -> PaymentFlow {
        PaymentFlow::new(
            self.db.clone(),
            self.gateway.clone(),
            self.config.gateway.key_secret.clone(),
        )
    }
}
