//! Code shared by the relay server and the relay client.

pub mod logger;
pub mod time;
pub mod wire;
