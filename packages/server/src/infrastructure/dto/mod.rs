//! Data Transfer Objects (DTOs) for the relay.
//!
//! - `conversion`: wire frame <-> domain entity
//! - `http`: HTTP API response DTOs
//!
//! The WebSocket frame itself lives in `relay_shared::wire` because the
//! client speaks it too.

pub mod conversion;
pub mod http;
