//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Bad input shape or a broken entity invariant.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{resource} with id {id} not found")]
    NotFound { resource: &'static str, id: String },

    /// Policy violation on otherwise well-formed input (e.g. unsupported currency).
    #[error("Business rule violated: {0}")]
    BusinessRule(String),

    /// Storage-level uniqueness violation.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Repository error: {0}")]
    Repo(String),

    #[error("UI error: {0}")]
    Ui(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Stable machine-readable code for the presentation boundary.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::BusinessRule(_) => "BUSINESS_RULE_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Repo(_) => "REPOSITORY_ERROR",
            Self::Ui(_) => "UI_ERROR",
        }
    }

    /// HTTP-equivalent status a transport adapter should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound { .. } => 404,
            Self::BusinessRule(_) => 422,
            Self::Conflict(_) => 409,
            Self::Repo(_) | Self::Ui(_) => 500,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_statuses_follow_the_taxonomy() {
        let e = DomainError::validation("Amount must be greater than zero");
        assert_eq!(e.code(), "VALIDATION_ERROR");
        assert_eq!(e.status_code(), 400);

        let e = DomainError::not_found("Transaction", "abc");
        assert_eq!(e.to_string(), "Transaction with id abc not found");
        assert_eq!(e.status_code(), 404);

        assert_eq!(DomainError::BusinessRule("x".into()).status_code(), 422);
        assert_eq!(DomainError::Conflict("x".into()).code(), "CONFLICT");
        assert_eq!(DomainError::Repo("x".into()).status_code(), 500);
    }
}
