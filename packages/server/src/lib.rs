//! Real-time location sharing server library.
//!
//! Clients connect over WebSocket, report their position, and receive the full
//! set of connected players every time it changes.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
