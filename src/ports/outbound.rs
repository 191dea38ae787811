//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters. Repositories own persistence mapping only, never domain validation.

use crate::domain::{
    Category, CategoryFilters, DomainError, Transaction, TransactionFilters, TransactionType,
};
use chrono::{DateTime, Utc};

/// Transaction persistence. Transactions are addressed by their external UID.
///
/// Listings are ordered newest `date` first.
#[async_trait::async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Insert when `id() == 0`, otherwise replace. Returns the stored entity (with its id).
    async fn save(&self, transaction: Transaction) -> Result<Transaction, DomainError>;

    async fn find_all(&self) -> Result<Vec<Transaction>, DomainError>;

    async fn find_by_id(&self, uid: &str) -> Result<Option<Transaction>, DomainError>;

    /// No-op if the UID is unknown.
    async fn delete(&self, uid: &str) -> Result<(), DomainError>;

    /// `limit = None` means unbounded; `offset = None` means 0.
    async fn find_by_filters(
        &self,
        filters: &TransactionFilters,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Transaction>, DomainError>;

    async fn find_all_paginated(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Transaction>, DomainError>;

    async fn find_by_category(&self, category_id: &str) -> Result<Vec<Transaction>, DomainError>;

    /// Both bounds inclusive.
    async fn find_by_date_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, DomainError>;

    async fn count_by_filters(&self, filters: &TransactionFilters) -> Result<u64, DomainError>;

    /// Sum of amounts of the given type; 0 when there are none.
    async fn get_total_amount_by_type(&self, kind: TransactionType) -> Result<f64, DomainError>;

    async fn count_by_category(&self, category_id: &str) -> Result<u64, DomainError>;
}

/// Category persistence. Categories are addressed by numeric storage id.
///
/// Listings are ordered newest `created_at` first.
#[async_trait::async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert when `id() == 0`, otherwise replace. A duplicate name or uid yields `DomainError::Conflict`.
    async fn save(&self, category: Category) -> Result<Category, DomainError>;

    async fn find_all(&self) -> Result<Vec<Category>, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, DomainError>;

    async fn find_by_uid(&self, uid: &str) -> Result<Option<Category>, DomainError>;

    async fn delete(&self, id: i64) -> Result<(), DomainError>;

    /// Exact name match.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError>;

    async fn find_by_filters(&self, filters: &CategoryFilters)
    -> Result<Vec<Category>, DomainError>;

    async fn find_active_categories(&self) -> Result<Vec<Category>, DomainError>;

    async fn find_inactive_categories(&self) -> Result<Vec<Category>, DomainError>;

    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError>;

    async fn exists_by_name_excluding_id(
        &self,
        name: &str,
        exclude_id: i64,
    ) -> Result<bool, DomainError>;
}

/// Source of globally unique external identifiers.
pub trait UidGenerator: Send + Sync {
    fn generate(&self) -> String;
}
