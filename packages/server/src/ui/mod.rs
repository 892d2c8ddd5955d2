//! Relay server transport surface: axum router and handlers.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
