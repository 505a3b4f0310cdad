//! Error types for the terminal client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server could not be reached at all
    #[error("Failed to connect: {0}")]
    ConnectFailed(String),

    /// An established connection ended unexpectedly
    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    /// A line typed by the user could not be understood
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}
