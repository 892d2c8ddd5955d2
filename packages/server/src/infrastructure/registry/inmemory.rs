//! インメモリの MembershipRegistry 実装
//!
//! ## ロック
//!
//! メンバーのマップ全体を 1 つの Mutex で保護します。`broadcast` は
//! ファンアウトの間ずっとロックを保持するため、ブロードキャストは全体で
//! 直列化され、途中でメンバーが削除されることはありません。
//! sink はキューに積むだけなので、ロック保持中に await することはありません。

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::domain::{
    BroadcastReport, ChatMessage, ConnectionId, ConnectionSink, MembershipRegistry,
};

type Members = HashMap<ConnectionId, Arc<dyn ConnectionSink>>;

/// Membership registry backed by a locked `HashMap`.
#[derive(Default)]
pub struct InMemoryMembershipRegistry {
    /// Key: connection id, Value: send half of that connection
    members: Mutex<Members>,
}

impl InMemoryMembershipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of the current members, sorted.
    #[cfg(test)]
    pub fn member_ids(&self) -> Vec<ConnectionId> {
        let mut ids: Vec<ConnectionId> = self.lock().keys().copied().collect();
        ids.sort();
        ids
    }

    // The map has no multi-step invariant a panicking holder could leave
    // half-applied, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Members> {
        self.members.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MembershipRegistry for InMemoryMembershipRegistry {
    fn register(&self, connection_id: ConnectionId, sink: Arc<dyn ConnectionSink>) {
        self.lock().insert(connection_id, sink);
    }

    fn deregister(&self, connection_id: ConnectionId) {
        self.lock().remove(&connection_id);
    }

    fn broadcast(&self, message: &ChatMessage) -> BroadcastReport {
        let members = self.lock();
        let mut report = BroadcastReport::default();

        for (connection_id, sink) in members.iter() {
            // A failing recipient never stops the fan-out
            match sink.send(message) {
                Ok(()) => {
                    report.delivered += 1;
                    tracing::debug!("Delivered message to '{}'", connection_id);
                }
                Err(e) => {
                    tracing::warn!("Error sending message to '{}': {}", connection_id, e);
                    report.failed.push(*connection_id);
                }
            }
        }

        report
    }

    fn contains(&self, connection_id: ConnectionId) -> bool {
        self.lock().contains_key(&connection_id)
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}
