//! WebSocket を使った接続の実装
//!
//! ## 責務
//!
//! - `WebSocketSink`: メッセージを JSON テキストフレームにエンコードし、
//!   unbounded チャンネル経由で接続ごとの writer タスクに渡す
//! - `WebSocketSource`: 受信フレームをメッセージにデコードし、
//!   正常な Close と失敗を区別する
//!
//! ## 設計ノート
//!
//! WebSocket の分割は UI 層（`ui/handler/websocket.rs`）で行われます。
//! チャンネルを読み出す writer タスクも UI 層にあります。

use async_trait::async_trait;
use axum::extract::ws::Message;
use futures_util::{Stream, StreamExt};
use relay_shared::wire::ChatFrame;
use tokio::sync::mpsc;

use crate::domain::{ChatMessage, ConnectionSink, ConnectionSource, SendError, StreamError};

/// Channel feeding one connection's writer task with encoded frames.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Send half of a WebSocket connection.
pub struct WebSocketSink {
    sender: PusherChannel,
}

impl WebSocketSink {
    pub fn new(sender: PusherChannel) -> Self {
        Self { sender }
    }
}

impl ConnectionSink for WebSocketSink {
    fn send(&self, message: &ChatMessage) -> Result<(), SendError> {
        let json = ChatFrame::from(message)
            .to_json()
            .map_err(|e| SendError::Encode(e.to_string()))?;
        // Fails only once the writer task has stopped
        self.sender
            .send(json)
            .map_err(|_| SendError::Disconnected)
    }
}

/// Receive half of a WebSocket connection.
///
/// Generic over the frame stream so it works on the read half of a split
/// `WebSocket` as well as on any other stream of frames.
pub struct WebSocketSource<S> {
    frames: S,
}

impl<S> WebSocketSource<S> {
    pub fn new(frames: S) -> Self {
        Self { frames }
    }
}

#[async_trait]
impl<S> ConnectionSource for WebSocketSource<S>
where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin + Send,
{
    async fn recv(&mut self) -> Result<Option<ChatMessage>, StreamError> {
        while let Some(frame) = self.frames.next().await {
            let frame = frame.map_err(|e| StreamError::Transport(e.to_string()))?;

            match frame {
                Message::Text(text) => {
                    let frame = ChatFrame::from_json(text.as_str())
                        .map_err(|e| StreamError::Malformed(e.to_string()))?;
                    return Ok(Some(frame.into()));
                }
                Message::Binary(data) => {
                    return Err(StreamError::Malformed(format!(
                        "unexpected binary frame ({} bytes)",
                        data.len()
                    )));
                }
                Message::Ping(_) | Message::Pong(_) => {
                    // Keep-alive, answered by the WebSocket layer
                    tracing::trace!("Skipping keep-alive frame");
                }
                Message::Close(_) => return Ok(None),
            }
        }

        // Stream ended without a close frame
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    fn text(json: &str) -> Result<Message, axum::Error> {
        Ok(Message::Text(json.to_string().into()))
    }

    fn source_of(
        frames: Vec<Result<Message, axum::Error>>,
    ) -> WebSocketSource<stream::Iter<std::vec::IntoIter<Result<Message, axum::Error>>>> {
        WebSocketSource::new(stream::iter(frames))
    }

    #[test]
    fn test_sink_encodes_json_text() {
        // テスト項目: 送信したメッセージが JSON フレームとして writer チャンネルに届く
        // given (前提条件):
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink = WebSocketSink::new(tx);

        // when (操作):
        let result = sink.send(&ChatMessage::new("alice", "hi"));

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(
            rx.try_recv().unwrap(),
            r#"{"sender_identity":"alice","body":"hi"}"#
        );
    }

    #[test]
    fn test_sink_reports_disconnected_writer() {
        // テスト項目: writer がいなくなると送信は Disconnected で失敗する
        // given (前提条件):
        let (tx, rx) = mpsc::unbounded_channel();
        let sink = WebSocketSink::new(tx);
        drop(rx);

        // when (操作):
        let result = sink.send(&ChatMessage::new("alice", "hi"));

        // then (期待する結果):
        assert_eq!(result, Err(SendError::Disconnected));
    }

    #[tokio::test]
    async fn test_source_decodes_text_frames_in_order() {
        // テスト項目: テキストフレームが到着順にメッセージになる
        // given (前提条件):
        let mut source = source_of(vec![
            text(r#"{"sender_identity":"alice","body":"one"}"#),
            text(r#"{"sender_identity":"alice","body":"two"}"#),
        ]);

        // when (操作) / then (期待する結果):
        assert_eq!(
            source.recv().await,
            Ok(Some(ChatMessage::new("alice", "one")))
        );
        assert_eq!(
            source.recv().await,
            Ok(Some(ChatMessage::new("alice", "two")))
        );
        assert_eq!(source.recv().await, Ok(None));
    }

    #[tokio::test]
    async fn test_source_treats_close_as_clean_end() {
        // テスト項目: Close フレームでストリームがエラーなしで終了する
        // given (前提条件):
        let mut source = source_of(vec![
            Ok(Message::Close(None)),
            text(r#"{"sender_identity":"late","body":"ignored"}"#),
        ]);

        // when (操作):
        let result = source.recv().await;

        // then (期待する結果):
        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn test_source_skips_keep_alive() {
        // テスト項目: ping/pong フレームはメッセージでも終了でもない
        // given (前提条件):
        let mut source = source_of(vec![
            Ok(Message::Ping(Vec::new().into())),
            Ok(Message::Pong(Vec::new().into())),
            text(r#"{"sender_identity":"bob","body":"still here"}"#),
        ]);

        // when (操作):
        let result = source.recv().await;

        // then (期待する結果):
        assert_eq!(result, Ok(Some(ChatMessage::new("bob", "still here"))));
    }

    #[tokio::test]
    async fn test_source_rejects_malformed_text() {
        // テスト項目: デコードできないテキストはメッセージではなくストリームエラー
        // given (前提条件):
        let mut source = source_of(vec![text("not json")]);

        // when (操作):
        let result = source.recv().await;

        // then (期待する結果):
        assert!(matches!(result, Err(StreamError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_source_rejects_binary() {
        // テスト項目: バイナリフレームはプロトコル外
        let mut source = source_of(vec![Ok(Message::Binary(vec![1, 2, 3].into()))]);
        assert!(matches!(source.recv().await, Err(StreamError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_source_surfaces_transport_error() {
        // テスト項目: 通信エラーは Transport として報告される
        // given (前提条件):
        let mut source = source_of(vec![Err(axum::Error::new(std::io::Error::other(
            "connection reset",
        )))]);

        // when (操作):
        let result = source.recv().await;

        // then (期待する結果):
        assert!(matches!(result, Err(StreamError::Transport(_))));
    }
}
