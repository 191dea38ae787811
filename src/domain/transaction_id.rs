//! TransactionId value object. Hyphenated UUID v4 only.

use crate::domain::DomainError;
use std::fmt;
use uuid::{Uuid, Variant, Version};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionId(String);

impl TransactionId {
    /// Fails if `value` is blank or not a canonical (8-4-4-4-12) UUID v4.
    pub fn create(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::validation("Transaction ID cannot be empty"));
        }
        if !is_uuid_v4(&value) {
            return Err(DomainError::validation(
                "Transaction ID must be a valid UUID v4",
            ));
        }
        Ok(Self(value))
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hyphenated form, version nibble 4, RFC 4122 variant (`[89ab]`). Case-insensitive.
fn is_uuid_v4(value: &str) -> bool {
    let hyphens_ok = value.len() == 36
        && value
            .char_indices()
            .all(|(i, c)| matches!(i, 8 | 13 | 18 | 23) == (c == '-'));
    if !hyphens_ok {
        return false;
    }
    match Uuid::parse_str(value) {
        Ok(uuid) => {
            uuid.get_version() == Some(Version::Random) && uuid.get_variant() == Variant::RFC4122
        }
        Err(_) => false,
    }
}
