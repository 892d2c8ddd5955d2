//! Domain entities.

/// A relayed chat message.
///
/// Immutable once constructed. The relay assigns no id, timestamp or
/// sequence number; what the sender wrote is what every recipient gets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    sender_identity: String,
    body: String,
}

impl ChatMessage {
    pub fn new(sender_identity: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sender_identity: sender_identity.into(),
            body: body.into(),
        }
    }

    pub fn sender_identity(&self) -> &str {
        &self.sender_identity
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}
