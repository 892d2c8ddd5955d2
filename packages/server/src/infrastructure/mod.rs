//! Infrastructure layer: concrete registry, transports and wire conversions.

pub mod connection;
pub mod dto;
pub mod registry;
