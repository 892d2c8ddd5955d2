//! Wire frame exchanged over a relay connection.
//!
//! Client-to-server and server-to-client frames share one shape. Each frame
//! travels as a single WebSocket text frame holding one JSON object.

use serde::{Deserialize, Serialize};

/// One chat frame: who sent it and what they said.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatFrame {
    pub sender_identity: String,
    pub body: String,
}

impl ChatFrame {
    pub fn new(sender_identity: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sender_identity: sender_identity.into(),
            body: body.into(),
        }
    }

    /// Encode as the JSON text carried in a WebSocket text frame.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode from the JSON text of a WebSocket text frame.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
