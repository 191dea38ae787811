//! Totals per transaction type and the signed balance.

use crate::domain::{BalanceCalculator, Currency, DomainError, Money, TransactionType};
use crate::ports::TransactionRepository;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSummary {
    pub income: Money,
    pub expense: Money,
    /// Income minus expense; negative when spending exceeds earnings.
    pub balance: f64,
    pub currency: Currency,
    pub transaction_count: usize,
}

pub struct GetBalance {
    repo: Arc<dyn TransactionRepository>,
}

impl GetBalance {
    pub fn new(repo: Arc<dyn TransactionRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> Result<BalanceSummary, DomainError> {
        let currency = Currency::Cop;
        let income = self
            .repo
            .get_total_amount_by_type(TransactionType::Income)
            .await?;
        let expense = self
            .repo
            .get_total_amount_by_type(TransactionType::Expense)
            .await?;

        let transactions = self.repo.find_all().await?;
        let balance = BalanceCalculator::calculate(&transactions);

        info!(income, expense, balance, count = transactions.len(), "balance computed");
        Ok(BalanceSummary {
            income: Money::create(income, currency.as_str())?,
            expense: Money::create(expense, currency.as_str())?,
            balance,
            currency,
            transaction_count: transactions.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::InMemoryTransactionRepository;
    use crate::domain::{Transaction, TransactionProps};
    use chrono::{TimeZone, Utc};

    async fn save(repo: &InMemoryTransactionRepository, amount: f64, kind: TransactionType) {
        let tx = Transaction::create(TransactionProps {
            id: None,
            uid: uuid::Uuid::new_v4().to_string(),
            amount,
            kind,
            currency: Currency::Cop,
            category_id: "general".into(),
            date: Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap(),
            description: None,
            created_at: None,
            updated_at: None,
        })
        .unwrap();
        repo.save(tx).await.unwrap();
    }

    #[tokio::test]
    async fn empty_store_has_zero_balance() {
        let uc = GetBalance::new(Arc::new(InMemoryTransactionRepository::new()));
        let summary = uc.execute().await.unwrap();
        assert_eq!(summary.balance, 0.0);
        assert_eq!(summary.income.amount(), 0.0);
        assert_eq!(summary.transaction_count, 0);
    }

    #[tokio::test]
    async fn balance_can_go_negative() {
        let repo = Arc::new(InMemoryTransactionRepository::new());
        save(&repo, 100.0, TransactionType::Income).await;
        save(&repo, 50.0, TransactionType::Expense).await;
        save(&repo, 200.0, TransactionType::Expense).await;

        let summary = GetBalance::new(repo).execute().await.unwrap();
        assert_eq!(summary.income.amount(), 100.0);
        assert_eq!(summary.expense.amount(), 250.0);
        assert_eq!(summary.balance, -150.0);
        assert_eq!(summary.income.currency(), "COP");
        assert!(summary.expense.is_greater_than(&summary.income).unwrap());
    }
}
