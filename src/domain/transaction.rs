//! Transaction entity. Immutable once built; constructed only through [`Transaction::create`]
//! (validating) or [`Transaction::restore`] (persistence mapping).

use crate::domain::{DomainError, Money};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INCOME" => Ok(Self::Income),
            "EXPENSE" => Ok(Self::Expense),
            other => Err(DomainError::validation(format!(
                "Unknown transaction type: {other}"
            ))),
        }
    }
}

/// Supported currencies. Only COP for now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Cop,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cop => "COP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    /// Malformed codes are validation errors; well-formed but unsupported codes break a business rule.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::validation(
                "Currency must be a 3-letter code",
            ));
        }
        match code {
            "COP" => Ok(Self::Cop),
            _ => Err(DomainError::BusinessRule(
                "Only COP currency is supported currently".into(),
            )),
        }
    }
}

/// Plain snapshot of a transaction. Input to the factory and output of `to_primitives`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionProps {
    /// Storage id; `None` (or 0) until persisted.
    pub id: Option<i64>,
    pub uid: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub currency: Currency,
    pub category_id: String,
    pub date: DateTime<Utc>,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct Transaction {
    id: i64,
    uid: String,
    amount: f64,
    kind: TransactionType,
    currency: Currency,
    category_id: String,
    date: DateTime<Utc>,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Validating factory, checked against the current time.
    pub fn create(props: TransactionProps) -> Result<Self, DomainError> {
        Self::create_at(props, Utc::now())
    }

    /// Validating factory with an explicit "now" for the future-date rule.
    pub fn create_at(props: TransactionProps, now: DateTime<Utc>) -> Result<Self, DomainError> {
        validate_uid(&props.uid)?;
        validate_amount(props.amount)?;
        validate_category_id(&props.category_id)?;
        validate_date(props.date, now)?;
        Ok(Self::build(props, now))
    }

    /// Rebuild from storage. The creation rules are not re-checked on load.
    pub fn restore(props: TransactionProps) -> Self {
        Self::build(props, Utc::now())
    }

    /// Timestamps are kept at millisecond precision, the resolution storage keeps.
    fn build(props: TransactionProps, now: DateTime<Utc>) -> Self {
        let created_at = props.created_at.unwrap_or(now).trunc_subsecs(3);
        Self {
            id: props.id.unwrap_or(0),
            uid: props.uid,
            amount: props.amount,
            kind: props.kind,
            currency: props.currency,
            category_id: props.category_id.trim().to_string(),
            date: props.date.trunc_subsecs(3),
            description: props.description.map(|d| d.trim().to_string()),
            created_at,
            updated_at: props.updated_at.map_or(created_at, |t| t.trunc_subsecs(3)),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn category_id(&self) -> &str {
        &self.category_id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn money(&self) -> Result<Money, DomainError> {
        Money::create(self.amount, self.currency.as_str())
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Copy carrying a storage-assigned id.
    pub fn with_id(&self, id: i64) -> Self {
        Self {
            id,
            ..self.clone()
        }
    }

    /// Business equality: every field except storage id and timestamps.
    pub fn equals(&self, other: &Transaction) -> bool {
        self.uid == other.uid
            && self.amount == other.amount
            && self.kind == other.kind
            && self.currency == other.currency
            && self.category_id == other.category_id
            && self.date == other.date
            && self.description == other.description
    }

    pub fn to_primitives(&self) -> TransactionProps {
        TransactionProps {
            id: Some(self.id),
            uid: self.uid.clone(),
            amount: self.amount,
            kind: self.kind,
            currency: self.currency,
            category_id: self.category_id.clone(),
            date: self.date,
            description: self.description.clone(),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

fn validate_uid(uid: &str) -> Result<(), DomainError> {
    if uid.trim().is_empty() {
        return Err(DomainError::validation("UID is required"));
    }
    Ok(())
}

/// Largest amount a DECIMAL(10, 2) column holds.
pub const AMOUNT_MAX: f64 = 99_999_999.99;

/// Positive, finite, and representable as DECIMAL(10, 2). Storage adapters enforce the same rule.
pub fn validate_amount(amount: f64) -> Result<(), DomainError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(DomainError::validation("Amount must be greater than zero"));
    }
    validate_amount_precision(amount)
}

/// DECIMAL(10, 2): at most [`AMOUNT_MAX`] and no more than two decimal places.
/// The value must survive rounding to cents unchanged.
fn validate_amount_precision(amount: f64) -> Result<(), DomainError> {
    if amount.abs() > AMOUNT_MAX {
        return Err(DomainError::validation(format!(
            "Amount must not exceed {AMOUNT_MAX:.2}"
        )));
    }
    let in_cents = format!("{amount:.2}").parse::<f64>().ok();
    if in_cents != Some(amount) {
        return Err(DomainError::validation(
            "Amount must have at most 2 decimal places",
        ));
    }
    Ok(())
}

fn validate_category_id(category_id: &str) -> Result<(), DomainError> {
    if category_id.trim().is_empty() {
        return Err(DomainError::validation("Category ID is required"));
    }
    Ok(())
}

/// A date equal to `now` is accepted.
pub fn validate_date(date: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), DomainError> {
    if date > now {
        return Err(DomainError::validation(
            "Transaction date cannot be in the future",
        ));
    }
    Ok(())
}
