//! Order API Module
//!
//! Read-only order history plus user-initiated deletion. Order
//! creation and settlement go through the payments module.

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/my", get(handler::my_orders))
        .route("/{id}", delete(handler::delete_order))
}
