//! Default categories inserted on first start. Idempotent: existing names are skipped.

use crate::domain::{Category, CategoryProps, DomainError};
use crate::ports::CategoryRepository;
use tracing::info;

/// (uid, name, description, color, icon)
const DEFAULT_CATEGORIES: &[(&str, &str, &str, &str, &str)] = &[
    (
        "default-food",
        "Food & Dining",
        "Restaurants, groceries, and food-related expenses",
        "#FF6B6B",
        "restaurant",
    ),
    (
        "default-transport",
        "Transportation",
        "Gas, public transport, car maintenance",
        "#4ECDC4",
        "directions_car",
    ),
    (
        "default-entertainment",
        "Entertainment",
        "Movies, games, hobbies, and fun activities",
        "#45B7D1",
        "sports_esports",
    ),
    (
        "default-health",
        "Health & Medical",
        "Doctor visits, medications, health insurance",
        "#96CEB4",
        "local_hospital",
    ),
    (
        "default-shopping",
        "Shopping",
        "Clothing, electronics, general purchases",
        "#FFEAA7",
        "shopping_cart",
    ),
    (
        "default-utilities",
        "Utilities",
        "Electricity, water, internet, phone bills",
        "#DDA0DD",
        "build",
    ),
    (
        "default-salary",
        "Salary",
        "Monthly salary and work-related income",
        "#98D8C8",
        "work",
    ),
    (
        "default-freelance",
        "Freelance",
        "Freelance work and side projects income",
        "#F7DC6F",
        "computer",
    ),
];

/// Insert any default category whose name is not yet taken. Returns how many were inserted.
pub async fn seed_default_categories(repo: &dyn CategoryRepository) -> Result<usize, DomainError> {
    let mut inserted = 0;
    for &(uid, name, description, color, icon) in DEFAULT_CATEGORIES {
        if repo.exists_by_name(name).await? || repo.find_by_uid(uid).await?.is_some() {
            continue;
        }
        let category = Category::create(CategoryProps {
            id: None,
            uid: uid.to_string(),
            name: name.to_string(),
            description: Some(description.to_string()),
            color: Some(color.to_string()),
            icon: Some(icon.to_string()),
            is_active: true,
            created_at: None,
            updated_at: None,
        })?;
        repo.save(category).await?;
        inserted += 1;
    }
    if inserted > 0 {
        info!(inserted, "seeded default categories");
    }
    Ok(inserted)
}
