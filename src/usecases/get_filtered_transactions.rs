//! Filtered, paginated transaction listing with a total count.

use crate::domain::{DomainError, TransactionFilters};
use crate::ports::TransactionRepository;
use crate::usecases::responses::TransactionResponse;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_LIMIT: u32 = 50;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetFilteredTransactionsRequest {
    #[serde(default)]
    pub filters: Option<TransactionFilters>,
    /// `None` or 0 falls back to [`DEFAULT_LIMIT`].
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetFilteredTransactionsResponse {
    pub transactions: Vec<TransactionResponse>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

pub struct GetFilteredTransactions {
    repo: Arc<dyn TransactionRepository>,
}

impl GetFilteredTransactions {
    pub fn new(repo: Arc<dyn TransactionRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        request: GetFilteredTransactionsRequest,
    ) -> Result<GetFilteredTransactionsResponse, DomainError> {
        let limit = request.limit.filter(|&l| l > 0).unwrap_or(DEFAULT_LIMIT);
        let offset = request.offset.unwrap_or(0);

        let filters = request.filters.filter(|f| !f.is_empty());
        let transactions = match &filters {
            Some(filters) => {
                self.repo
                    .find_by_filters(filters, Some(limit), Some(offset))
                    .await?
            }
            None => self.repo.find_all_paginated(limit, offset).await?,
        };
        // empty filters count every row
        let total = self
            .repo
            .count_by_filters(&filters.unwrap_or_default())
            .await?;

        info!(total, returned = transactions.len(), limit, offset, "filtered transactions");
        Ok(GetFilteredTransactionsResponse {
            transactions: transactions.iter().map(TransactionResponse::from).collect(),
            total,
            limit,
            offset,
        })
    }
}
