//! Cross-cutting concerns shared by the composition root and adapters.

pub mod config;
