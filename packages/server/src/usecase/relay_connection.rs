//! UseCase: 1 つの接続を受け入れから切断まで中継する
//!
//! 登録 -> ブロードキャストループ -> 登録解除。
//! 登録解除は drop guard に結び付けているので、早期 return、panic、
//! タスクの中断のいずれでも実行されます。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, ConnectionIdFactory, ConnectionSink, ConnectionSource, MembershipRegistry,
};

use super::{broadcast_loop::BroadcastLoopUseCase, error::RelayError};

/// Connection lifecycle around the broadcast loop
pub struct RelayConnectionUseCase {
    registry: Arc<dyn MembershipRegistry>,
    id_factory: Arc<ConnectionIdFactory>,
    broadcast_loop: BroadcastLoopUseCase,
}

impl RelayConnectionUseCase {
    pub fn new(
        registry: Arc<dyn MembershipRegistry>,
        id_factory: Arc<ConnectionIdFactory>,
    ) -> Self {
        Self {
            broadcast_loop: BroadcastLoopUseCase::new(registry.clone()),
            registry,
            id_factory,
        }
    }

    /// Relay a newly accepted connection until it ends.
    ///
    /// # Arguments
    ///
    /// * `sink` - send half, shared with the registry while the connection is active
    /// * `source` - receive half, owned by the loop
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - the client closed cleanly; number of messages relayed
    /// * `Err(RelayError)` - the stream failed; the transport should tear it down
    pub async fn execute<S>(
        &self,
        sink: Arc<dyn ConnectionSink>,
        mut source: S,
    ) -> Result<u64, RelayError>
    where
        S: ConnectionSource,
    {
        let connection_id = self.id_factory.generate();

        self.registry.register(connection_id, sink);
        let _registration = RegistrationGuard {
            registry: self.registry.clone(),
            connection_id,
        };
        tracing::info!(
            "Connection '{}' registered ({} active)",
            connection_id,
            self.registry.len()
        );

        self.broadcast_loop.execute(connection_id, &mut source).await
    }
}

/// Removes a connection from the registry when dropped.
struct RegistrationGuard {
    registry: Arc<dyn MembershipRegistry>,
    connection_id: ConnectionId,
}

impl Drop for RegistrationGuard {
    fn drop(&mut self) {
        self.registry.deregister(self.connection_id);
        tracing::info!(
            "Connection '{}' deregistered ({} active)",
            self.connection_id,
            self.registry.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ChatMessage, MockConnectionSink, StreamError},
        infrastructure::{
            connection::{ChannelPeer, channel_connection},
            registry::InMemoryMembershipRegistry,
        },
    };
    use std::time::Duration;

    fn create_test_usecase() -> (Arc<RelayConnectionUseCase>, Arc<InMemoryMembershipRegistry>) {
        let registry = Arc::new(InMemoryMembershipRegistry::new());
        let usecase = Arc::new(RelayConnectionUseCase::new(
            registry.clone(),
            Arc::new(ConnectionIdFactory::new()),
        ));
        (usecase, registry)
    }

    /// Spawn a relayed in-process connection and return its client end.
    fn connect(
        usecase: &Arc<RelayConnectionUseCase>,
    ) -> (ChannelPeer, tokio::task::JoinHandle<Result<u64, RelayError>>) {
        let (sink, source, peer) = channel_connection();
        let usecase = usecase.clone();
        let handle = tokio::spawn(async move { usecase.execute(Arc::new(sink), source).await });
        (peer, handle)
    }

    async fn wait_for_members(registry: &InMemoryMembershipRegistry, expected: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while registry.len() != expected {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("registry did not reach the expected size");
    }

    async fn recv(peer: &mut ChannelPeer) -> ChatMessage {
        tokio::time::timeout(Duration::from_secs(5), peer.recv())
            .await
            .expect("timed out waiting for a message")
            .expect("relay closed the connection")
    }

    #[tokio::test]
    async fn test_fan_out_reaches_all_including_sender() {
        // テスト項目: 1 つの接続からのメッセージが N 個すべての接続にちょうど 1 回ずつ届く
        // given (前提条件):
        let (usecase, registry) = create_test_usecase();
        let mut peers: Vec<ChannelPeer> = (0..4).map(|_| connect(&usecase).0).collect();
        wait_for_members(&registry, 4).await;

        // when (操作):
        peers[2].send(ChatMessage::new("carol", "hello all"));

        // then (期待する結果):
        for peer in peers.iter_mut() {
            assert_eq!(recv(peer).await, ChatMessage::new("carol", "hello all"));
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
        for peer in peers.iter_mut() {
            assert_eq!(peer.try_recv(), None);
        }
    }

    #[tokio::test]
    async fn test_three_client_scenario() {
        // テスト項目: A, B, C が接続、A が hi を送信、B が離脱、A が bye を送信
        // given (前提条件):
        let (usecase, registry) = create_test_usecase();
        let (mut a, _) = connect(&usecase);
        let (mut b, b_handle) = connect(&usecase);
        let (mut c, _) = connect(&usecase);
        wait_for_members(&registry, 3).await;

        // when (操作):
        a.send(ChatMessage::new("A", "hi"));

        // then (期待する結果):
        assert_eq!(recv(&mut a).await, ChatMessage::new("A", "hi"));
        assert_eq!(recv(&mut b).await, ChatMessage::new("A", "hi"));
        assert_eq!(recv(&mut c).await, ChatMessage::new("A", "hi"));

        // when (操作): B が切断し、A がもう一度送信
        b.half_close();
        assert_eq!(b_handle.await.unwrap(), Ok(0));
        wait_for_members(&registry, 2).await;
        a.send(ChatMessage::new("A", "bye"));

        // then (期待する結果):
        assert_eq!(recv(&mut a).await, ChatMessage::new("A", "bye"));
        assert_eq!(recv(&mut c).await, ChatMessage::new("A", "bye"));
        assert_eq!(b.try_recv(), None);
    }

    #[tokio::test]
    async fn test_per_sender_order_is_preserved() {
        // テスト項目: すべての受信者が 1 人の送信者のメッセージを送信順に受け取る
        // given (前提条件):
        let (usecase, registry) = create_test_usecase();
        let (sender, _) = connect(&usecase);
        let (mut other, _) = connect(&usecase);
        wait_for_members(&registry, 2).await;

        // when (操作):
        for i in 0..50 {
            sender.send(ChatMessage::new("alice", format!("m{i}")));
        }

        // then (期待する結果):
        for i in 0..50 {
            assert_eq!(recv(&mut other).await.body(), format!("m{i}"));
        }
    }

    #[tokio::test]
    async fn test_deregistered_after_clean_end() {
        // テスト項目: 正常に閉じた接続は登録解除され、以降は送信されない
        // given (前提条件):
        let (usecase, registry) = create_test_usecase();
        let (mut leaving, handle) = connect(&usecase);
        let (staying, _) = connect(&usecase);
        wait_for_members(&registry, 2).await;

        // when (操作):
        leaving.half_close();
        let result = handle.await.unwrap();
        staying.send(ChatMessage::new("bob", "after"));

        // then (期待する結果):
        assert_eq!(result, Ok(0));
        assert_eq!(registry.len(), 1);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(leaving.try_recv(), None);
    }

    #[tokio::test]
    async fn test_deregistered_after_read_error() {
        // テスト項目: エラーで終わった接続も正常終了と同様に登録解除される
        // given (前提条件):
        let (usecase, registry) = create_test_usecase();
        let (failing, handle) = connect(&usecase);
        wait_for_members(&registry, 1).await;

        // when (操作):
        failing.fail(StreamError::Malformed("garbage".to_string()));
        let result = handle.await.unwrap();

        // then (期待する結果):
        assert!(matches!(result, Err(RelayError::StreamRead { .. })));
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_no_send_attempted_on_terminated_handle() {
        // テスト項目: 終了後のブロードキャストは古い sink に触れない
        // given (前提条件): 一度も使われてはいけない sink
        let (usecase, registry) = create_test_usecase();
        let mut sink = MockConnectionSink::new();
        sink.expect_send().never();
        let (_unused_sink, source, mut closing_peer) = channel_connection();
        closing_peer.half_close();

        // when (操作):
        let result = usecase.execute(Arc::new(sink), source).await;
        let (other, _) = connect(&usecase);
        wait_for_members(&registry, 1).await;
        other.send(ChatMessage::new("bob", "hello?"));
        tokio::time::sleep(Duration::from_millis(50)).await;

        // then (期待する結果): モックの `never` の期待が守られる
        assert_eq!(result, Ok(0));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_deregistered_when_task_is_aborted() {
        // テスト項目: 接続タスクを中断しても登録解除される
        // given (前提条件):
        let (usecase, registry) = create_test_usecase();
        let (_peer, handle) = connect(&usecase);
        wait_for_members(&registry, 1).await;

        // when (操作):
        handle.abort();
        let _ = handle.await;

        // then (期待する結果):
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_reconnect_gets_new_identity() {
        // テスト項目: 再接続したクライアントは無関係な新しい接続として扱われる
        // given (前提条件):
        let (usecase, registry) = create_test_usecase();
        let (mut first, handle) = connect(&usecase);
        wait_for_members(&registry, 1).await;
        let first_ids = registry.member_ids();
        first.half_close();
        handle.await.unwrap().unwrap();

        // when (操作):
        let (_second, _) = connect(&usecase);
        wait_for_members(&registry, 1).await;

        // then (期待する結果):
        assert_ne!(registry.member_ids(), first_ids);
    }
}
