//! Persistence adapters. Implement the repository ports.

pub mod memory_repo;
pub mod seed;
pub mod sqlite_repo;

pub use memory_repo::{InMemoryCategoryRepository, InMemoryTransactionRepository};
pub use seed::seed_default_categories;
pub use sqlite_repo::SqliteRepo;
