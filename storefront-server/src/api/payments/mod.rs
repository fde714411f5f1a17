//! Payment API Module
//!
//! Checkout handoff and signature-verified settlement. Both routes
//! require authentication.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Payment router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/payments", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/order", post(handler::create_order))
        .route("/verify", post(handler::verify_payment))
}
