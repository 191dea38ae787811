//! Create a transaction: check business rules, mint a UID, build the entity, persist.

use crate::domain::{
    Currency, DomainError, Transaction, TransactionId, TransactionProps, TransactionType,
    transaction::validate_date,
};
use crate::ports::{TransactionRepository, UidGenerator};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionCommand {
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Raw currency code as received; parsed and checked against the supported set.
    pub currency: String,
    pub category_id: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Exposes the UID, never the storage id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionResult {
    pub uid: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub currency: Currency,
    pub category_id: String,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct CreateTransaction {
    repo: Arc<dyn TransactionRepository>,
    uid_generator: Arc<dyn UidGenerator>,
}

impl CreateTransaction {
    pub fn new(repo: Arc<dyn TransactionRepository>, uid_generator: Arc<dyn UidGenerator>) -> Self {
        Self {
            repo,
            uid_generator,
        }
    }

    pub async fn execute(
        &self,
        command: CreateTransactionCommand,
    ) -> Result<CreateTransactionResult, DomainError> {
        let now = Utc::now();
        let currency = Self::check_business_rules(&command, now)?;

        let uid = TransactionId::create(self.uid_generator.generate())?;
        let transaction = Transaction::create_at(
            TransactionProps {
                id: None,
                uid: uid.into_inner(),
                amount: command.amount,
                kind: command.kind,
                currency,
                category_id: command.category_id,
                date: command.date,
                description: command.description,
                created_at: None,
                updated_at: None,
            },
            now,
        )?;

        let saved = self.repo.save(transaction).await?;
        info!(
            uid = saved.uid(),
            amount = saved.amount(),
            kind = %saved.kind(),
            "transaction created"
        );
        Ok(Self::to_result(&saved))
    }

    /// Checked ahead of the entity factory; both must hold.
    fn check_business_rules(
        command: &CreateTransactionCommand,
        now: DateTime<Utc>,
    ) -> Result<Currency, DomainError> {
        let currency = command.currency.parse::<Currency>()?;
        validate_date(command.date, now)?;
        if !command.amount.is_finite() || command.amount <= 0.0 {
            return Err(DomainError::validation(
                "Transaction amount must be greater than zero",
            ));
        }
        Ok(currency)
    }

    fn to_result(t: &Transaction) -> CreateTransactionResult {
        CreateTransactionResult {
            uid: t.uid().to_string(),
            amount: t.amount(),
            kind: t.kind(),
            currency: t.currency(),
            category_id: t.category_id().to_string(),
            date: t.date(),
            description: t.description().map(str::to_string),
            created_at: t.created_at(),
        }
    }
}
