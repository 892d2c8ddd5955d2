//! Conversion logic between the wire frame and the domain entity.

use relay_shared::wire::ChatFrame;

use crate::domain::ChatMessage;

impl From<ChatFrame> for ChatMessage {
    fn from(frame: ChatFrame) -> Self {
        ChatMessage::new(frame.sender_identity, frame.body)
    }
}

impl From<&ChatMessage> for ChatFrame {
    fn from(message: &ChatMessage) -> Self {
        ChatFrame::new(message.sender_identity(), message.body())
    }
}
