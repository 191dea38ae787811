//! Application use cases. Orchestrate domain logic via ports.

pub mod create_category;
pub mod create_transaction;
pub mod get_all_categories;
pub mod get_all_transactions;
pub mod get_balance;
pub mod get_filtered_transactions;
pub mod responses;

pub use create_category::{CreateCategory, CreateCategoryRequest};
pub use create_transaction::{CreateTransaction, CreateTransactionCommand, CreateTransactionResult};
pub use get_all_categories::{GetAllCategories, GetAllCategoriesResponse};
pub use get_all_transactions::{GetAllTransactions, GetAllTransactionsQuery, GetAllTransactionsResult};
pub use get_balance::{BalanceSummary, GetBalance};
pub use get_filtered_transactions::{
    GetFilteredTransactions, GetFilteredTransactionsRequest, GetFilteredTransactionsResponse,
};
pub use responses::{CategoryResponse, TransactionDto, TransactionResponse};
