//! Terminal client for the broadcast relay.
//!
//! Reads lines from the terminal, sends each as a chat frame, and prints
//! every frame the relay broadcasts (its own included).

pub mod domain;
pub mod error;
pub mod formatter;
pub mod runner;
pub mod session;
pub mod ui;

pub use runner::run_client;
