//! Core Module
//!
//! Configuration, state and the HTTP server.

pub mod config;
pub mod server;
pub mod state;

pub use config::{Config, GatewayConfig};
pub use server::Server;
pub use state::ServerState;
