//! Cart API Module
//!
//! All routes require authentication and are scoped to the caller.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Cart router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::add))
        .route("/{id}", axum::routing::put(handler::update).delete(handler::remove))
}
