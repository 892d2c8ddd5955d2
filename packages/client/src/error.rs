//! Error types for the relay client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The relay URL cannot be used
    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An established connection went away
    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    /// Terminal input error
    #[error("Input error: {0}")]
    Input(String),
}
