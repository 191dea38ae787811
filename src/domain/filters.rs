//! Query filters passed to repositories. All fields optional; empty filters match everything.
//!
//! Blank text criteria count as absent.

use crate::domain::{Category, Currency, Transaction, TransactionType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilters {
    #[serde(rename = "type")]
    pub kind: Option<TransactionType>,
    pub currency: Option<Currency>,
    pub category_id: Option<String>,
    /// Inclusive.
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive.
    pub date_to: Option<DateTime<Utc>>,
    pub amount_min: Option<f64>,
    pub amount_max: Option<f64>,
    /// Case-insensitive substring.
    pub description: Option<String>,
}

/// Case folding used by every text filter. Storage adapters keep a folded copy of the
/// searchable columns produced by this same function.
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

/// `Some` only for a non-blank value.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl TransactionFilters {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.currency.is_none()
            && non_blank(&self.category_id).is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
            && self.amount_min.is_none()
            && self.amount_max.is_none()
            && non_blank(&self.description).is_none()
    }

    /// In-process evaluation; the SQL adapter builds the equivalent WHERE clause.
    pub fn matches(&self, tx: &Transaction) -> bool {
        if self.kind.is_some_and(|k| k != tx.kind()) {
            return false;
        }
        if self.currency.is_some_and(|c| c != tx.currency()) {
            return false;
        }
        if let Some(category_id) = non_blank(&self.category_id) {
            if category_id != tx.category_id() {
                return false;
            }
        }
        if self.date_from.is_some_and(|from| tx.date() < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| tx.date() > to) {
            return false;
        }
        if self.amount_min.is_some_and(|min| tx.amount() < min) {
            return false;
        }
        if self.amount_max.is_some_and(|max| tx.amount() > max) {
            return false;
        }
        if let Some(needle) = non_blank(&self.description) {
            let haystack = fold_case(tx.description().unwrap_or_default());
            if !haystack.contains(&fold_case(needle)) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFilters {
    /// Case-insensitive substring.
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl CategoryFilters {
    pub fn is_empty(&self) -> bool {
        non_blank(&self.name).is_none()
            && self.is_active.is_none()
            && non_blank(&self.color).is_none()
            && non_blank(&self.icon).is_none()
    }

    pub fn matches(&self, category: &Category) -> bool {
        if let Some(needle) = non_blank(&self.name) {
            if !fold_case(category.name()).contains(&fold_case(needle)) {
                return false;
            }
        }
        if self.is_active.is_some_and(|a| a != category.is_active()) {
            return false;
        }
        if let Some(color) = non_blank(&self.color) {
            if category.color() != Some(color) {
                return false;
            }
        }
        if let Some(icon) = non_blank(&self.icon) {
            if category.icon() != Some(icon) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryProps, TransactionProps};
    use chrono::TimeZone;

    fn tx(amount: f64, kind: TransactionType, day: u32, description: Option<&str>) -> Transaction {
        Transaction::create(TransactionProps {
            id: None,
            uid: format!("uid-{day}"),
            amount,
            kind,
            currency: Currency::Cop,
            category_id: "food".into(),
            date: Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap(),
            description: description.map(Into::into),
            created_at: None,
            updated_at: None,
        })
        .unwrap()
    }

    #[test]
    fn empty_filters_match_everything() {
        let f = TransactionFilters::default();
        assert!(f.is_empty());
        assert!(f.matches(&tx(1.0, TransactionType::Income, 1, None)));
    }

    #[test]
    fn ranges_are_inclusive() {
        let t = tx(100.0, TransactionType::Expense, 10, None);
        let f = TransactionFilters {
            date_from: Some(t.date()),
            date_to: Some(t.date()),
            amount_min: Some(100.0),
            amount_max: Some(100.0),
            ..Default::default()
        };
        assert!(!f.is_empty());
        assert!(f.matches(&t));

        let f = TransactionFilters {
            amount_min: Some(100.01),
            ..Default::default()
        };
        assert!(!f.matches(&t));
    }

    #[test]
    fn description_is_case_insensitive_substring() {
        let t = tx(5.0, TransactionType::Expense, 2, Some("Lunch at Cafe"));
        let f = TransactionFilters {
            description: Some("cafe".into()),
            ..Default::default()
        };
        assert!(f.matches(&t));
        assert!(!f.matches(&tx(5.0, TransactionType::Expense, 2, None)));
    }

    #[test]
    fn blank_text_criteria_are_ignored() {
        let f = TransactionFilters {
            category_id: Some(String::new()),
            description: Some("  ".into()),
            ..Default::default()
        };
        assert!(f.is_empty());
        assert!(f.matches(&tx(5.0, TransactionType::Income, 2, None)));
        assert!(
            CategoryFilters {
                name: Some(String::new()),
                ..Default::default()
            }
            .is_empty()
        );
    }

    #[test]
    fn type_filter() {
        let f = TransactionFilters {
            kind: Some(TransactionType::Income),
            ..Default::default()
        };
        assert!(f.matches(&tx(5.0, TransactionType::Income, 2, None)));
        assert!(!f.matches(&tx(5.0, TransactionType::Expense, 2, None)));
    }

    #[test]
    fn category_filters() {
        let c = Category::create(CategoryProps {
            id: None,
            uid: "default-food".into(),
            name: "Food & Dining".into(),
            description: None,
            color: Some("#FF6B6B".into()),
            icon: Some("restaurant".into()),
            is_active: true,
            created_at: None,
            updated_at: None,
        })
        .unwrap();

        let by_name = CategoryFilters {
            name: Some("food".into()),
            ..Default::default()
        };
        assert!(by_name.matches(&c));

        let inactive = CategoryFilters {
            is_active: Some(false),
            ..Default::default()
        };
        assert!(!inactive.matches(&c));

        let by_color = CategoryFilters {
            color: Some("#FF6B6B".into()),
            icon: Some("restaurant".into()),
            ..Default::default()
        };
        assert!(by_color.matches(&c));
    }

    #[test]
    fn text_filters_fold_accented_case() {
        let t = tx(12_000.0, TransactionType::Expense, 4, Some("Almuerzo en CAFÉ"));
        let f = TransactionFilters {
            description: Some("café".into()),
            ..Default::default()
        };
        assert!(f.matches(&t));
        assert_eq!(fold_case("ÁRBOL Ñandú"), "árbol ñandú");
    }
}
