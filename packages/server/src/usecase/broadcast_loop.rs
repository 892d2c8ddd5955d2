//! UseCase: per-connection broadcast loop
//!
//! `ACTIVE -> (message -> broadcast -> ACTIVE) | (end -> TERMINATED) | (error -> TERMINATED)`
//!
//! A message is fully fanned out before the next one is read from the same
//! connection, which keeps each sender's messages in order for every
//! recipient.

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionSource, MembershipRegistry};

use super::error::RelayError;

/// Broadcast loop of one connection
pub struct BroadcastLoopUseCase {
    registry: Arc<dyn MembershipRegistry>,
}

impl BroadcastLoopUseCase {
    pub fn new(registry: Arc<dyn MembershipRegistry>) -> Self {
        Self { registry }
    }

    /// Run until the connection ends.
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - clean end of stream; number of messages relayed
    /// * `Err(RelayError)` - the stream failed
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        source: &mut dyn ConnectionSource,
    ) -> Result<u64, RelayError> {
        let mut relayed = 0;

        loop {
            match source.recv().await {
                Ok(Some(message)) => {
                    tracing::info!("[{}]: {}", message.sender_identity(), message.body());

                    let report = self.registry.broadcast(&message);
                    if !report.failed.is_empty() {
                        tracing::debug!(
                            "Message from '{}' reached {}/{} recipients",
                            connection_id,
                            report.delivered,
                            report.attempted()
                        );
                    }
                    relayed += 1;
                }
                Ok(None) => {
                    tracing::debug!("Connection '{}' reached end of stream", connection_id);
                    return Ok(relayed);
                }
                Err(e) => {
                    tracing::error!("Error receiving message on '{}': {}", connection_id, e);
                    return Err(RelayError::StreamRead {
                        connection_id,
                        source: e,
                    });
                }
            }
        }
    }
}
