//! UI layer: axum router, HTTP and WebSocket handlers.

mod config;
mod handler;
mod server;
mod signal;
pub mod state;

pub use config::{HeartbeatConfig, ServerConfig};
pub use server::Server;
