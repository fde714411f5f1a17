//! Storefront Server - e-commerce REST backend
//!
//! # Architecture
//!
//! - **HTTP API** (`api`): RESTful routes for catalog, cart, wishlist,
//!   addresses, orders and payments
//! - **Database** (`db`): embedded SurrealDB storage with a repository
//!   layer
//! - **Authentication** (`auth`): JWT bearer-token validation
//! - **Payments** (`payments`): gateway handoff and signature-verified
//!   settlement
//!
//! # Module structure
//!
//! ```text
//! storefront-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT validation, CurrentUser
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # models and repositories
//! ├── payments/      # gateway adapter and reconciliation flow
//! └── utils/         # errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod payments;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use payments::{PaymentFlow, PaymentGateway};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and initialize logging before anything else reads the
/// environment.
pub fn setup_environment() -> AppResult<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty());
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}
