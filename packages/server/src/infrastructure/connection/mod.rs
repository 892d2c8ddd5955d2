//! Connection transports.
//!
//! - `websocket`: sink/source over an axum WebSocket
//! - `channel`: in-process connection pair backed by tokio channels

pub mod channel;
pub mod websocket;

pub use channel::{ChannelPeer, ChannelSink, ChannelSource, channel_connection};
pub use websocket::{PusherChannel, WebSocketSink, WebSocketSource};
