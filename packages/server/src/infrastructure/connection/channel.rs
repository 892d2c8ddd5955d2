//! In-process connection pair.
//!
//! `channel_connection` returns the server-side halves (`ChannelSink`,
//! `ChannelSource`) plus the client end (`ChannelPeer`). Useful for
//! embedding the relay without a network and for driving it in tests.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::{ChatMessage, ConnectionSink, ConnectionSource, SendError, StreamError};

type Inbound = Result<ChatMessage, StreamError>;

/// Server-side send half: delivers into the peer's inbox.
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<ChatMessage>,
}

impl ConnectionSink for ChannelSink {
    fn send(&self, message: &ChatMessage) -> Result<(), SendError> {
        self.sender
            .send(message.clone())
            .map_err(|_| SendError::Disconnected)
    }
}

/// Server-side receive half: yields what the peer sends.
pub struct ChannelSource {
    receiver: mpsc::UnboundedReceiver<Inbound>,
}

#[async_trait]
impl ConnectionSource for ChannelSource {
    async fn recv(&mut self) -> Result<Option<ChatMessage>, StreamError> {
        match self.receiver.recv().await {
            Some(Ok(message)) => Ok(Some(message)),
            Some(Err(e)) => Err(e),
            // Peer dropped its outbound side: half-close
            None => Ok(None),
        }
    }
}

/// Client end of an in-process connection.
pub struct ChannelPeer {
    outbound: Option<mpsc::UnboundedSender<Inbound>>,
    inbox: mpsc::UnboundedReceiver<ChatMessage>,
}

impl ChannelPeer {
    /// Send a message to the relay. Returns `false` after `half_close`
    /// or once the server side is gone.
    pub fn send(&self, message: ChatMessage) -> bool {
        self.outbound
            .as_ref()
            .is_some_and(|outbound| outbound.send(Ok(message)).is_ok())
    }

    /// Make the server's next read fail with `error`.
    pub fn fail(&self, error: StreamError) -> bool {
        self.outbound
            .as_ref()
            .is_some_and(|outbound| outbound.send(Err(error)).is_ok())
    }

    /// Signal end of outbound messages. Messages already sent are still read.
    pub fn half_close(&mut self) {
        self.outbound = None;
    }

    /// Wait for the next message relayed to this peer.
    pub async fn recv(&mut self) -> Option<ChatMessage> {
        self.inbox.recv().await
    }

    /// Next relayed message if one is already queued.
    pub fn try_recv(&mut self) -> Option<ChatMessage> {
        self.inbox.try_recv().ok()
    }
}

/// Create a connected in-process pair.
pub fn channel_connection() -> (ChannelSink, ChannelSource, ChannelPeer) {
    let (to_peer, inbox) = mpsc::unbounded_channel();
    let (outbound, from_peer) = mpsc::unbounded_channel();

    (
        ChannelSink { sender: to_peer },
        ChannelSource {
            receiver: from_peer,
        },
        ChannelPeer {
            outbound: Some(outbound),
            inbox,
        },
    )
}
