//! 接続の trait 定義
//!
//! クライアントの双方向ストリームを 2 つに分割して扱います。
//!
//! - 受信側（[`ConnectionSource`]）: その接続を読むブロードキャストループが所有
//! - 送信側（[`ConnectionSink`]）: 他の接続のブロードキャストが届くよう
//!   MembershipRegistry と共有

use async_trait::async_trait;

use super::{ChatMessage, SendError, StreamError};

/// Send half of a connection.
///
/// `send` must not block: it is called while the registry lock is held for
/// a whole fan-out.
#[cfg_attr(test, mockall::automock)]
pub trait ConnectionSink: Send + Sync {
    fn send(&self, message: &ChatMessage) -> Result<(), SendError>;
}

/// Receive half of a connection.
#[async_trait]
pub trait ConnectionSource: Send {
    /// Wait for the next inbound message.
    ///
    /// * `Ok(Some(message))` - a message arrived
    /// * `Ok(None)` - the client half-closed (clean end of stream)
    /// * `Err(_)` - the stream failed
    async fn recv(&mut self) -> Result<Option<ChatMessage>, StreamError>;
}
