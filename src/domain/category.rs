//! Category entity. Built only through the validating [`Category::create`] factory.

use crate::domain::DomainError;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProps {
    /// Storage id; `None` (or 0) until persisted.
    pub id: Option<i64>,
    pub uid: String,
    pub name: String,
    pub description: Option<String>,
    /// `#RRGGBB`.
    pub color: Option<String>,
    pub icon: Option<String>,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct Category {
    id: i64,
    uid: String,
    name: String,
    description: Option<String>,
    color: Option<String>,
    icon: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Category {
    pub fn create(props: CategoryProps) -> Result<Self, DomainError> {
        validate_name(&props.name)?;
        validate_uid(&props.uid)?;
        validate_color(props.color.as_deref())?;

        // millisecond precision, as stored
        let created_at = props.created_at.unwrap_or_else(Utc::now).trunc_subsecs(3);
        Ok(Self {
            id: props.id.unwrap_or(0),
            uid: props.uid,
            name: props.name.trim().to_string(),
            description: props.description.map(|d| d.trim().to_string()),
            color: props.color,
            icon: props.icon,
            is_active: props.is_active,
            created_at,
            updated_at: props.updated_at.map_or(created_at, |t| t.trunc_subsecs(3)),
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_inactive(&self) -> bool {
        !self.is_active
    }

    pub fn has_description(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.is_empty())
    }

    pub fn has_custom_appearance(&self) -> bool {
        self.color.as_deref().is_some_and(|c| !c.is_empty())
            || self.icon.as_deref().is_some_and(|i| !i.is_empty())
    }

    pub fn with_id(&self, id: i64) -> Self {
        Self {
            id,
            ..self.clone()
        }
    }

    /// Structural over uid, name, description, color, icon and the active flag.
    pub fn equals(&self, other: &Category) -> bool {
        self.uid == other.uid
            && self.name == other.name
            && self.description == other.description
            && self.color == other.color
            && self.icon == other.icon
            && self.is_active == other.is_active
    }

    pub fn to_primitives(&self) -> CategoryProps {
        CategoryProps {
            id: Some(self.id),
            uid: self.uid.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            color: self.color.clone(),
            icon: self.icon.clone(),
            is_active: self.is_active,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("Category name is required"));
    }
    let len = trimmed.chars().count();
    if len < NAME_MIN_LEN {
        return Err(DomainError::validation(format!(
            "Category name must be at least {NAME_MIN_LEN} characters long"
        )));
    }
    if len > NAME_MAX_LEN {
        return Err(DomainError::validation(format!(
            "Category name must not exceed {NAME_MAX_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_uid(uid: &str) -> Result<(), DomainError> {
    if uid.trim().is_empty() {
        return Err(DomainError::validation("UID is required"));
    }
    Ok(())
}

/// An empty string counts as "no color".
fn validate_color(color: Option<&str>) -> Result<(), DomainError> {
    match color {
        Some(c) if !c.is_empty() && !is_hex_color(c) => Err(DomainError::validation(
            "Color must be a valid hex color format (#RRGGBB)",
        )),
        _ => Ok(()),
    }
}

pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(name: &str) -> CategoryProps {
        CategoryProps {
            id: None,
            uid: "cat-1".into(),
            name: name.into(),
            description: None,
            color: None,
            icon: None,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn name_length_bounds() {
        assert!(Category::create(props("A")).unwrap_err().is_validation());
        assert!(Category::create(props("AB")).is_ok());
        assert!(Category::create(props(&"x".repeat(50))).is_ok());
        assert!(Category::create(props(&"x".repeat(51))).is_err());
        assert!(Category::create(props("   ")).is_err());
        // length is measured after trimming
        assert!(Category::create(props("  A  ")).is_err());
    }

    #[test]
    fn name_is_trimmed() {
        let c = Category::create(props("  Food  ")).unwrap();
        assert_eq!(c.name(), "Food");
    }

    #[test]
    fn uid_is_required() {
        let mut p = props("Food");
        p.uid = " ".into();
        assert_eq!(
            Category::create(p).unwrap_err(),
            DomainError::validation("UID is required")
        );
    }

    #[test]
    fn color_must_be_strict_hex() {
        let mut p = props("Food");
        p.color = Some("#ZZZZZZ".into());
        assert!(Category::create(p.clone()).unwrap_err().is_validation());

        for bad in ["FF6B6B", "#FF6B6", "#FF6B6B0", "#ff6b6g"] {
            p.color = Some(bad.into());
            assert!(Category::create(p.clone()).is_err(), "{bad} accepted");
        }

        p.color = Some("#FF6B6B".into());
        assert!(Category::create(p.clone()).is_ok());
        p.color = Some("#ff6b6b".into());
        assert!(Category::create(p).is_ok());
    }

    #[test]
    fn predicates() {
        let plain = Category::create(props("Food")).unwrap();
        assert!(!plain.is_inactive());
        assert!(!plain.has_description());
        assert!(!plain.has_custom_appearance());

        let mut p = props("Food");
        p.is_active = false;
        p.description = Some("Groceries".into());
        p.icon = Some("restaurant".into());
        let rich = Category::create(p).unwrap();
        assert!(rich.is_inactive());
        assert!(rich.has_description());
        assert!(rich.has_custom_appearance());
    }

    #[test]
    fn primitives_round_trip_is_equal() {
        let mut p = props("Transport");
        p.color = Some("#4ECDC4".into());
        p.description = Some("Bus and gas".into());
        let original = Category::create(p).unwrap().with_id(4);
        let copy = Category::create(original.to_primitives()).unwrap();
        assert_eq!(copy, original);
        assert_eq!(copy.id(), 4);
    }

    #[test]
    fn equality_covers_active_flag() {
        let a = Category::create(props("Food")).unwrap();
        let mut p = props("Food");
        p.is_active = false;
        assert_ne!(a, Category::create(p).unwrap());
    }

    #[test]
    fn timestamps_are_truncated_to_milliseconds() {
        let c = Category::create(props("Food")).unwrap();
        assert_eq!(c.created_at().timestamp_subsec_nanos() % 1_000_000, 0);
        assert_eq!(c.updated_at(), c.created_at());
    }
}
