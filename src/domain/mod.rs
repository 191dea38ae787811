//! Core domain layer. No external I/O dependencies.
//!
//! Value objects, entities and business rules live here. Dependencies flow inward.

pub mod balance;
pub mod category;
pub mod errors;
pub mod filters;
pub mod money;
pub mod transaction;
pub mod transaction_id;

pub use balance::BalanceCalculator;
pub use category::{Category, CategoryProps};
pub use errors::DomainError;
pub use filters::{CategoryFilters, TransactionFilters};
pub use money::Money;
pub use transaction::{Currency, Transaction, TransactionProps, TransactionType};
pub use transaction_id::TransactionId;
