//! Plain response records handed to the presentation layer.

use crate::domain::{Category, Currency, Transaction, TransactionType};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Public view of a transaction. Exposes the UID only; the storage id stays private.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
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
    pub updated_at: DateTime<Utc>,
}

impl From<&Transaction> for TransactionDto {
    fn from(t: &Transaction) -> Self {
        Self {
            uid: t.uid().to_string(),
            amount: t.amount(),
            kind: t.kind(),
            currency: t.currency(),
            category_id: t.category_id().to_string(),
            date: t.date(),
            description: t.description().map(str::to_string),
            created_at: t.created_at(),
            updated_at: t.updated_at(),
        }
    }
}

/// Transaction row for filtered listings; carries both storage id and UID.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: i64,
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
    pub updated_at: DateTime<Utc>,
}

impl From<&Transaction> for TransactionResponse {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id(),
            uid: t.uid().to_string(),
            amount: t.amount(),
            kind: t.kind(),
            currency: t.currency(),
            category_id: t.category_id().to_string(),
            date: t.date(),
            description: t.description().map(str::to_string),
            created_at: t.created_at(),
            updated_at: t.updated_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i64,
    pub uid: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Category> for CategoryResponse {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id(),
            uid: c.uid().to_string(),
            name: c.name().to_string(),
            description: c.description().map(str::to_string),
            color: c.color().map(str::to_string),
            icon: c.icon().map(str::to_string),
            is_active: c.is_active(),
            created_at: c.created_at(),
            updated_at: c.updated_at(),
        }
    }
}
