//! Infrastructure adapters. Implement outbound ports and drive the inbound one.
//!
//! Storage, identifier generation, terminal UI. Map errors to DomainError.

pub mod persistence;
pub mod ui;
pub mod uid;
