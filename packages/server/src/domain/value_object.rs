//! Value objects.

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

/// Identity of one accepted connection.
///
/// Used as the registry key instead of the stream object itself. A client
/// that reconnects gets a fresh id; ids are never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Monotonic [`ConnectionId`] generator.
#[derive(Debug)]
pub struct ConnectionIdFactory {
    next: AtomicU64,
}

impl ConnectionIdFactory {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    pub fn generate(&self) -> ConnectionId {
        ConnectionId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ConnectionIdFactory {
    fn default() -> Self {
        Self::new()
    }
}
