//! List every transaction, optionally sliced in memory.

use crate::domain::DomainError;
use crate::ports::TransactionRepository;
use crate::usecases::responses::TransactionDto;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetAllTransactionsQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetAllTransactionsResult {
    pub transactions: Vec<TransactionDto>,
    /// Count before slicing.
    pub total: usize,
}

pub struct GetAllTransactions {
    repo: Arc<dyn TransactionRepository>,
}

impl GetAllTransactions {
    pub fn new(repo: Arc<dyn TransactionRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        query: GetAllTransactionsQuery,
    ) -> Result<GetAllTransactionsResult, DomainError> {
        let all = self.repo.find_all().await?;
        let total = all.len();

        let limit = query.limit.filter(|&l| l > 0);
        let offset = query.offset.filter(|&o| o > 0);

        let page: Vec<TransactionDto> = match (limit, offset) {
            (None, None) => all.iter().map(TransactionDto::from).collect(),
            (limit, offset) => {
                let start = offset.unwrap_or(0) as usize;
                let take = limit.map_or(usize::MAX, |l| l as usize);
                all.iter()
                    .skip(start)
                    .take(take)
                    .map(TransactionDto::from)
                    .collect()
            }
        };

        info!(total, returned = page.len(), "listed transactions");
        Ok(GetAllTransactionsResult {
            transactions: page,
            total,
        })
    }
}
