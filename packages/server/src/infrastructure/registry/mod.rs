//! Membership registry implementations.

pub mod inmemory;

pub use inmemory::InMemoryMembershipRegistry;
