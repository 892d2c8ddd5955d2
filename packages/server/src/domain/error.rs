//! Domain error types.

use thiserror::Error;

/// Failure to deliver a message to one recipient.
///
/// Always isolated to that recipient: a broadcast logs it and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    /// The remote end (or its writer) is gone
    #[error("recipient disconnected")]
    Disconnected,

    /// The message could not be encoded for the wire
    #[error("failed to encode message: {0}")]
    Encode(String),
}

/// Failure while reading the next inbound message of a connection.
///
/// Terminates that connection's loop only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// The underlying transport reported an error
    #[error("transport error: {0}")]
    Transport(String),

    /// A frame arrived that is not a chat message
    #[error("malformed frame: {0}")]
    Malformed(String),
}
