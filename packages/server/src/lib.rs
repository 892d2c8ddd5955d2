//! Broadcast relay server library.
//!
//! Every message received on any connection is rebroadcast to every
//! connection currently registered, the sender included.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
