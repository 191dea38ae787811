//! Create a category with a unique name.

use crate::domain::{Category, CategoryProps, DomainError};
use crate::ports::{CategoryRepository, UidGenerator};
use crate::usecases::responses::CategoryResponse;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    /// Defaults to active.
    #[serde(default)]
    pub is_active: Option<bool>,
}

pub struct CreateCategory {
    repo: Arc<dyn CategoryRepository>,
    uid_generator: Arc<dyn UidGenerator>,
}

impl CreateCategory {
    pub fn new(repo: Arc<dyn CategoryRepository>, uid_generator: Arc<dyn UidGenerator>) -> Self {
        Self {
            repo,
            uid_generator,
        }
    }

    pub async fn execute(
        &self,
        request: CreateCategoryRequest,
    ) -> Result<CategoryResponse, DomainError> {
        let name = request.name.trim().to_string();
        if self.repo.find_by_name(&name).await?.is_some() {
            return Err(Self::duplicate(&name));
        }

        let category = Category::create(CategoryProps {
            id: None,
            uid: self.uid_generator.generate(),
            name: name.clone(),
            description: request.description,
            color: request.color,
            icon: request.icon,
            is_active: request.is_active.unwrap_or(true),
            created_at: None,
            updated_at: None,
        })?;

        let saved = match self.repo.save(category).await {
            Ok(saved) => saved,
            // Lost a race with a concurrent insert of the same name; other conflicts pass through.
            Err(DomainError::Conflict(reason)) => {
                warn!(name = %name, %reason, "category insert conflicted");
                if self.repo.exists_by_name(&name).await? {
                    return Err(Self::duplicate(&name));
                }
                return Err(DomainError::Conflict(reason));
            }
            Err(e) => return Err(e),
        };

        info!(id = saved.id(), uid = saved.uid(), name = saved.name(), "category created");
        Ok(CategoryResponse::from(&saved))
    }

    fn duplicate(name: &str) -> DomainError {
        DomainError::validation(format!("Category with name \"{name}\" already exists"))
    }
}
