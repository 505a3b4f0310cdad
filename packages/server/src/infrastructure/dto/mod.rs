//! Data Transfer Objects (DTOs) for the location sharing service.
//!
//! - `websocket`: WebSocket message DTOs (shared with the client crate)
//! - `conversion`: conversions between DTOs and domain types

pub mod conversion;
pub mod websocket;
