//! Domain layer: the message entity, connection identity, the connection
//! capability traits and the membership registry interface.

pub mod connection;
pub mod entity;
pub mod error;
pub mod registry;
pub mod value_object;

pub use connection::{ConnectionSink, ConnectionSource};
pub use entity::ChatMessage;
pub use error::{SendError, StreamError};
pub use registry::{BroadcastReport, MembershipRegistry};
pub use value_object::{ConnectionId, ConnectionIdFactory};

#[cfg(test)]
pub use connection::MockConnectionSink;
