//! MembershipRegistry trait 定義
//!
//! UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。

use std::sync::Arc;

use super::{ChatMessage, ConnectionId, ConnectionSink};

/// Outcome of one fan-out.
///
/// Informational only; failed recipients are never an error for the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Number of recipients the message was handed to
    pub delivered: usize,
    /// Recipients whose send failed
    pub failed: Vec<ConnectionId>,
}

impl BroadcastReport {
    pub fn attempted(&self) -> usize {
        self.delivered + self.failed.len()
    }
}

/// The set of connections currently able to accept sends.
///
/// Register, deregister and a full broadcast are each atomic with respect
/// to one another. Implementations never remove a member as a side effect
/// of a failed send; only the owning connection deregisters itself.
pub trait MembershipRegistry: Send + Sync {
    /// Add a member. Registering an id that is already present replaces
    /// its sink and changes nothing else.
    fn register(&self, connection_id: ConnectionId, sink: Arc<dyn ConnectionSink>);

    /// Remove a member. No-op when absent.
    fn deregister(&self, connection_id: ConnectionId);

    /// Send `message` to every current member under a single critical section.
    fn broadcast(&self, message: &ChatMessage) -> BroadcastReport;

    fn contains(&self, connection_id: ConnectionId) -> bool;

    /// Number of current members.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
