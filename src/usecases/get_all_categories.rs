//! List categories, optionally filtered.

use crate::domain::{CategoryFilters, DomainError};
use crate::ports::CategoryRepository;
use crate::usecases::responses::CategoryResponse;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct GetAllCategoriesResponse {
    pub categories: Vec<CategoryResponse>,
    pub total: usize,
}

pub struct GetAllCategories {
    repo: Arc<dyn CategoryRepository>,
}

impl GetAllCategories {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        filters: Option<CategoryFilters>,
    ) -> Result<GetAllCategoriesResponse, DomainError> {
        let categories = match filters.filter(|f| !f.is_empty()) {
            Some(filters) => self.repo.find_by_filters(&filters).await?,
            None => self.repo.find_all().await?,
        };

        info!(total = categories.len(), "listed categories");
        Ok(GetAllCategoriesResponse {
            total: categories.len(),
            categories: categories.iter().map(CategoryResponse::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::InMemoryCategoryRepository;
    use crate::domain::{Category, CategoryProps};

    async fn repo() -> Arc<InMemoryCategoryRepository> {
        let repo = Arc::new(InMemoryCategoryRepository::new());
        for (name, active) in [("Food", true), ("Transport", true), ("Old stuff", false)] {
            let category = Category::create(CategoryProps {
                id: None,
                uid: uuid::Uuid::new_v4().to_string(),
                name: name.into(),
                description: None,
                color: None,
                icon: None,
                is_active: active,
                created_at: None,
                updated_at: None,
            })
            .unwrap();
            repo.save(category).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn lists_all_without_filters() {
        let uc = GetAllCategories::new(repo().await);
        let response = uc.execute(None).await.unwrap();
        assert_eq!(response.total, 3);
        assert_eq!(response.categories.len(), 3);
    }

    #[tokio::test]
    async fn filters_by_active_flag() {
        let uc = GetAllCategories::new(repo().await);
        let response = uc
            .execute(Some(CategoryFilters {
                is_active: Some(false),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.categories[0].name, "Old stuff");
    }

    #[tokio::test]
    async fn name_filter_is_case_insensitive_substring() {
        let uc = GetAllCategories::new(repo().await);
        let response = uc
            .execute(Some(CategoryFilters {
                name: Some("TRANS".into()),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.categories[0].name, "Transport");
    }

    #[tokio::test]
    async fn empty_filters_list_everything() {
        let uc = GetAllCategories::new(repo().await);
        let response = uc.execute(Some(CategoryFilters::default())).await.unwrap();
        assert_eq!(response.total, 3);
    }
}
