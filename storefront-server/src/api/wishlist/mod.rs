//! Wishlist API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Wishlist router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/wishlist", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::add))
        .route("/{id}", axum::routing::put(handler::update).delete(handler::remove))
}
