//! Money value object: a non-negative amount tagged with a 3-letter currency code.
//!
//! No rounding policy is applied; decimal precision is the caller's concern.

use crate::domain::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MoneyParts")]
pub struct Money {
    amount: f64,
    currency: String,
}

/// Wire shape; deserialized values go through [`Money::create`].
#[derive(Deserialize)]
struct MoneyParts {
    amount: f64,
    currency: String,
}

impl TryFrom<MoneyParts> for Money {
    type Error = DomainError;

    fn try_from(parts: MoneyParts) -> Result<Self, Self::Error> {
        Money::create(parts.amount, parts.currency)
    }
}

impl Money {
    /// Fails when `amount` is negative or non-finite, or `currency` is not a 3-character code.
    pub fn create(amount: f64, currency: impl Into<String>) -> Result<Self, DomainError> {
        let currency = currency.into();
        Self::validate_amount(amount)?;
        Self::validate_currency(&currency)?;
        Ok(Self { amount, currency })
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn add(&self, other: &Money) -> Result<Money, DomainError> {
        self.ensure_same_currency(other)?;
        Money::create(self.amount + other.amount, self.currency.clone())
    }

    /// Fails if the result would be negative.
    pub fn subtract(&self, other: &Money) -> Result<Money, DomainError> {
        self.ensure_same_currency(other)?;
        Money::create(self.amount - other.amount, self.currency.clone())
    }

    pub fn multiply(&self, factor: f64) -> Result<Money, DomainError> {
        if factor < 0.0 {
            return Err(DomainError::validation("Factor cannot be negative"));
        }
        Money::create(self.amount * factor, self.currency.clone())
    }

    pub fn is_greater_than(&self, other: &Money) -> Result<bool, DomainError> {
        self.ensure_same_currency(other)?;
        Ok(self.amount > other.amount)
    }

    pub fn is_less_than(&self, other: &Money) -> Result<bool, DomainError> {
        self.ensure_same_currency(other)?;
        Ok(self.amount < other.amount)
    }

    fn validate_amount(amount: f64) -> Result<(), DomainError> {
        if !amount.is_finite() {
            return Err(DomainError::validation("Amount must be a finite number"));
        }
        if amount < 0.0 {
            return Err(DomainError::validation("Amount cannot be negative"));
        }
        Ok(())
    }

    fn validate_currency(currency: &str) -> Result<(), DomainError> {
        if currency.trim().is_empty() {
            return Err(DomainError::validation("Currency is required"));
        }
        if currency.chars().count() != 3 {
            return Err(DomainError::validation(
                "Currency must be 3 characters long",
            ));
        }
        Ok(())
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), DomainError> {
        if self.currency != other.currency {
            return Err(DomainError::validation(format!(
                "Cannot operate with different currencies: {} and {}",
                self.currency, other.currency
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cop(amount: f64) -> Money {
        Money::create(amount, "COP").unwrap()
    }

    #[test]
    fn negative_amount_is_rejected_but_zero_is_allowed() {
        assert!(Money::create(-1.0, "COP").unwrap_err().is_validation());
        assert_eq!(cop(0.0).amount(), 0.0);
    }

    #[test]
    fn non_finite_amount_is_rejected() {
        assert!(Money::create(f64::NAN, "COP").is_err());
        assert!(Money::create(f64::INFINITY, "COP").is_err());
    }

    #[test]
    fn currency_must_be_three_characters() {
        assert!(Money::create(1.0, "").is_err());
        assert!(Money::create(1.0, "   ").is_err());
        assert!(Money::create(1.0, "CO").is_err());
        assert!(Money::create(1.0, "COPX").is_err());
        assert!(Money::create(1.0, "USD").is_ok());
    }

    #[test]
    fn arithmetic_requires_same_currency() {
        let usd = Money::create(5.0, "USD").unwrap();
        assert!(cop(10.0).add(&usd).is_err());
        assert!(cop(10.0).subtract(&usd).is_err());
        assert!(cop(10.0).is_greater_than(&usd).is_err());

        assert_eq!(cop(10.0).add(&cop(5.0)).unwrap(), cop(15.0));
        assert_eq!(cop(10.0).subtract(&cop(4.0)).unwrap(), cop(6.0));
        assert!(cop(10.0).is_greater_than(&cop(4.0)).unwrap());
        assert!(cop(1.0).is_less_than(&cop(4.0)).unwrap());
    }

    #[test]
    fn subtracting_below_zero_fails() {
        assert!(cop(1.0).subtract(&cop(2.0)).is_err());
    }

    #[test]
    fn multiply_rejects_negative_factor() {
        assert!(cop(10.0).multiply(-1.0).is_err());
        assert_eq!(cop(10.0).multiply(2.5).unwrap(), cop(25.0));
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(cop(3.0), cop(3.0));
        assert_ne!(cop(3.0), Money::create(3.0, "USD").unwrap());
        assert_eq!(cop(3.5).to_string(), "3.5 COP");
    }

    #[test]
    fn deserialization_applies_the_same_rules() {
        let ok: Money = serde_json::from_str(r#"{"amount":12.5,"currency":"COP"}"#).unwrap();
        assert_eq!(ok, cop(12.5));
        assert!(serde_json::from_str::<Money>(r#"{"amount":-1,"currency":"COP"}"#).is_err());
        assert!(serde_json::from_str::<Money>(r#"{"amount":1,"currency":"PESO"}"#).is_err());
    }
}
