//! UseCase layer: the per-connection broadcast loop and the connection
//! lifecycle around it.

pub mod broadcast_loop;
pub mod error;
pub mod relay_connection;

pub use broadcast_loop::BroadcastLoopUseCase;
pub use error::RelayError;
pub use relay_connection::RelayConnectionUseCase;
