//! In-memory repositories. Implement TransactionRepository and CategoryRepository over a `Vec`.
//!
//! Used as the test double and as the `storage = "memory"` backend. Mirrors the SQLite adapter:
//! ids assigned on first save, unique uid/name constraints, the DECIMAL(10, 2) amount rule,
//! same listing order.

use crate::domain::transaction::validate_amount;
use crate::domain::{
    Category, CategoryFilters, DomainError, Transaction, TransactionFilters, TransactionType,
};
use crate::ports::{CategoryRepository, TransactionRepository};
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use tokio::sync::RwLock;
use tracing::debug;

struct Table<T> {
    rows: Vec<T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

fn paginate<T>(rows: Vec<T>, limit: Option<u32>, offset: Option<u32>) -> Vec<T> {
    let offset = offset.unwrap_or(0) as usize;
    let iter = rows.into_iter().skip(offset);
    match limit {
        Some(limit) => iter.take(limit as usize).collect(),
        None => iter.collect(),
    }
}

#[derive(Default)]
pub struct InMemoryTransactionRepository {
    table: RwLock<Table<Transaction>>,
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of rows matching `keep`, newest date first.
    async fn select(&self, keep: impl Fn(&Transaction) -> bool) -> Vec<Transaction> {
        let table = self.table.read().await;
        let mut rows: Vec<Transaction> = table.rows.iter().filter(|&t| keep(t)).cloned().collect();
        rows.sort_by_key(|t| Reverse((t.date(), t.id())));
        rows
    }
}

#[async_trait::async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn save(&self, transaction: Transaction) -> Result<Transaction, DomainError> {
        validate_amount(transaction.amount())?;
        let mut table = self.table.write().await;
        let uid_taken = table
            .rows
            .iter()
            .any(|t| t.uid() == transaction.uid() && t.id() != transaction.id());
        if uid_taken {
            return Err(DomainError::Conflict(format!(
                "transaction uid {} already exists",
                transaction.uid()
            )));
        }

        if transaction.id() == 0 {
            let id = table.next_id;
            table.next_id += 1;
            let stored = transaction.with_id(id);
            table.rows.push(stored.clone());
            debug!(id, uid = stored.uid(), "transaction inserted (memory)");
            return Ok(stored);
        }

        let id = transaction.id();
        match table.rows.iter().position(|t| t.id() == id) {
            Some(index) => table.rows[index] = transaction.clone(),
            None => {
                table.next_id = table.next_id.max(id + 1);
                table.rows.push(transaction.clone());
            }
        }
        Ok(transaction)
    }

    async fn find_all(&self) -> Result<Vec<Transaction>, DomainError> {
        Ok(self.select(|_| true).await)
    }

    async fn find_by_id(&self, uid: &str) -> Result<Option<Transaction>, DomainError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|t| t.uid() == uid).cloned())
    }

    async fn delete(&self, uid: &str) -> Result<(), DomainError> {
        let mut table = self.table.write().await;
        table.rows.retain(|t| t.uid() != uid);
        Ok(())
    }

    async fn find_by_filters(
        &self,
        filters: &TransactionFilters,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Transaction>, DomainError> {
        let rows = self.select(|t| filters.matches(t)).await;
        Ok(paginate(rows, limit, offset))
    }

    async fn find_all_paginated(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Transaction>, DomainError> {
        let rows = self.select(|_| true).await;
        Ok(paginate(rows, Some(limit), Some(offset)))
    }

    async fn find_by_category(&self, category_id: &str) -> Result<Vec<Transaction>, DomainError> {
        Ok(self.select(|t| t.category_id() == category_id).await)
    }

    async fn find_by_date_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, DomainError> {
        Ok(self.select(|t| t.date() >= from && t.date() <= to).await)
    }

    async fn count_by_filters(&self, filters: &TransactionFilters) -> Result<u64, DomainError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().filter(|t| filters.matches(t)).count() as u64)
    }

    async fn get_total_amount_by_type(&self, kind: TransactionType) -> Result<f64, DomainError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|t| t.kind() == kind)
            .map(Transaction::amount)
            .sum())
    }

    async fn count_by_category(&self, category_id: &str) -> Result<u64, DomainError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|t| t.category_id() == category_id)
            .count() as u64)
    }
}

#[derive(Default)]
pub struct InMemoryCategoryRepository {
    table: RwLock<Table<Category>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn select(&self, keep: impl Fn(&Category) -> bool) -> Vec<Category> {
        let table = self.table.read().await;
        let mut rows: Vec<Category> = table.rows.iter().filter(|&c| keep(c)).cloned().collect();
        rows.sort_by_key(|c| Reverse((c.created_at(), c.id())));
        rows
    }
}

#[async_trait::async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn save(&self, category: Category) -> Result<Category, DomainError> {
        let mut table = self.table.write().await;
        let clashes = |same: &dyn Fn(&Category) -> bool| {
            table
                .rows
                .iter()
                .any(|c| c.id() != category.id() && same(c))
        };
        let name_taken = clashes(&|c| c.name() == category.name());
        let uid_taken = clashes(&|c| c.uid() == category.uid());
        if name_taken {
            return Err(DomainError::Conflict(format!(
                "category name {} already exists",
                category.name()
            )));
        }
        if uid_taken {
            return Err(DomainError::Conflict(format!(
                "category uid {} already exists",
                category.uid()
            )));
        }

        if category.id() == 0 {
            let id = table.next_id;
            table.next_id += 1;
            let stored = category.with_id(id);
            table.rows.push(stored.clone());
            debug!(id, uid = stored.uid(), "category inserted (memory)");
            return Ok(stored);
        }

        let id = category.id();
        match table.rows.iter().position(|c| c.id() == id) {
            Some(index) => table.rows[index] = category.clone(),
            None => {
                table.next_id = table.next_id.max(id + 1);
                table.rows.push(category.clone());
            }
        }
        Ok(category)
    }

    async fn find_all(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.select(|_| true).await)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, DomainError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|c| c.id() == id).cloned())
    }

    async fn find_by_uid(&self, uid: &str) -> Result<Option<Category>, DomainError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|c| c.uid() == uid).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let mut table = self.table.write().await;
        table.rows.retain(|c| c.id() != id);
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|c| c.name() == name).cloned())
    }

    async fn find_by_filters(
        &self,
        filters: &CategoryFilters,
    ) -> Result<Vec<Category>, DomainError> {
        Ok(self.select(|c| filters.matches(c)).await)
    }

    async fn find_active_categories(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.select(Category::is_active).await)
    }

    async fn find_inactive_categories(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.select(Category::is_inactive).await)
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().any(|c| c.name() == name))
    }

    async fn exists_by_name_excluding_id(
        &self,
        name: &str,
        exclude_id: i64,
    ) -> Result<bool, DomainError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .any(|c| c.name() == name && c.id() != exclude_id))
    }
}
