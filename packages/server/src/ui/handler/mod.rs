//! Request handlers.

pub mod http;
pub mod websocket;

pub use http::{get_connections, health_check};
pub use websocket::websocket_handler;
