//! Catalog service for tools and categories.
//!
//! Admin CRUD over the catalog plus the user-facing launch path, which runs
//! the tool-specific authorization rule and appends an access-log record.
//! There is no aggregation over the log here; it is an append-only audit
//! trail.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tooldeck_store::models::{AccessLog, Category, PlanTier, Profile, Tool};
use tooldeck_store::CatalogStore;
use uuid::Uuid;

use crate::auth::gate::Gate;
use crate::errors::ApiError;

/// Input payload for creating a tool.
#[derive(Debug, Deserialize)]
pub struct ToolDraft {
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_free: bool,
    #[serde(default = "default_plan")]
    pub min_plan_required: PlanTier,
}

/// Partial update for a tool; absent fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct ToolUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub is_active: Option<bool>,
    pub is_free: Option<bool>,
    pub min_plan_required: Option<PlanTier>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub order_index: i32,
}

#[derive(Debug, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub order_index: Option<i32>,
    pub is_active: Option<bool>,
}

fn default_true() -> bool {
    true
}

fn default_plan() -> PlanTier {
    PlanTier::Free
}

#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
        CatalogService { catalog }
    }

    pub async fn list_tools(&self, include_inactive: bool) -> Result<Vec<Tool>, ApiError> {
        Ok(self.catalog.list_tools(!include_inactive).await?)
    }

    pub async fn get_tool(&self, id: Uuid) -> Result<Tool, ApiError> {
        self.catalog
            .get_tool(id)
            .await?
            .ok_or(ApiError::NotFound("tool"))
    }

    /// Runs the tool gate for the caller and records the launch in the
    /// access log. Returns the tool so the caller can hand out its access
    /// details.
    pub async fn launch_tool(&self, profile: &Profile, tool_id: Uuid) -> Result<Tool, ApiError> {
        let tool = self.get_tool(tool_id).await?;
        Gate::authorize_tool(profile, &tool)?;
        self.catalog
            .record_access(AccessLog {
                id: Uuid::new_v4(),
                user_id: profile.id,
                tool_id: tool.id,
                accessed_at: Utc::now(),
            })
            .await?;
        tracing::info!(user_id = %profile.id, tool_id = %tool.id, "tool launched");
        Ok(tool)
    }

    pub async fn create_tool(&self, draft: ToolDraft) -> Result<Tool, ApiError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(ApiError::Validation {
                field: "name",
                message: "must not be empty".to_string(),
            });
        }
        let now = Utc::now();
        let tool = Tool {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: draft.description,
            category_id: draft.category_id,
            is_active: draft.is_active,
            is_free: draft.is_free,
            min_plan_required: draft.min_plan_required,
            created_at: now,
            updated_at: now,
        };
        self.catalog.insert_tool(tool.clone()).await?;
        Ok(tool)
    }

    pub async fn update_tool(&self, id: Uuid, update: ToolUpdate) -> Result<Tool, ApiError> {
        let mut tool = self.get_tool(id).await?;
        if let Some(name) = update.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(ApiError::Validation {
                    field: "name",
                    message: "must not be empty".to_string(),
                });
            }
            tool.name = name;
        }
        if let Some(description) = update.description {
            tool.description = Some(description);
        }
        if let Some(category_id) = update.category_id {
            tool.category_id = Some(category_id);
        }
        if let Some(is_active) = update.is_active {
            tool.is_active = is_active;
        }
        if let Some(is_free) = update.is_free {
            tool.is_free = is_free;
        }
        if let Some(min_plan) = update.min_plan_required {
            tool.min_plan_required = min_plan;
        }
        tool.updated_at = Utc::now();
        self.catalog.update_tool(tool.clone()).await?;
        Ok(tool)
    }

    pub async fn delete_tool(&self, id: Uuid) -> Result<(), ApiError> {
        Ok(self.catalog.delete_tool(id).await?)
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        Ok(self.catalog.list_categories().await?)
    }

    pub async fn create_category(&self, draft: CategoryDraft) -> Result<Category, ApiError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(ApiError::Validation {
                field: "name",
                message: "must not be empty".to_string(),
            });
        }
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: draft.description,
            order_index: draft.order_index,
            is_active: true,
            created_at: Utc::now(),
        };
        self.catalog.insert_category(category.clone()).await?;
        Ok(category)
    }

    pub async fn update_category(
        &self,
        id: Uuid,
        update: CategoryUpdate,
    ) -> Result<Category, ApiError> {
        let mut category = self
            .catalog
            .get_category(id)
            .await?
            .ok_or(ApiError::NotFound("category"))?;
        if let Some(name) = update.name {
            category.name = name;
        }
        if let Some(description) = update.description {
            category.description = Some(description);
        }
        if let Some(order_index) = update.order_index {
            category.order_index = order_index;
        }
        if let Some(is_active) = update.is_active {
            category.is_active = is_active;
        }
        self.catalog.update_category(category.clone()).await?;
        Ok(category)
    }

    pub async fn delete_category(&self, id: Uuid) -> Result<(), ApiError> {
        Ok(self.catalog.delete_category(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tooldeck_store::memory::MemoryStore;
    use tooldeck_store::models::AccountStatus;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(MemoryStore::new()))
    }

    fn draft(name: &str, is_free: bool, min_plan: PlanTier) -> ToolDraft {
        ToolDraft {
            name: name.to_string(),
            description: None,
            category_id: None,
            is_active: true,
            is_free,
            min_plan_required: min_plan,
        }
    }

    #[tokio::test]
    async fn launch_is_refused_below_the_plan_floor() {
        let catalog = service();
        let tool = catalog
            .create_tool(draft("Render Farm", false, PlanTier::Premium))
            .await
            .unwrap();

        let profile = Profile::new("u@d.e".to_string(), "U".to_string());
        let err = catalog.launch_tool(&profile, tool.id).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
    }

    #[tokio::test]
    async fn launch_succeeds_for_free_tools_on_active_accounts() {
        let catalog = service();
        let tool = catalog
            .create_tool(draft("Notes", true, PlanTier::Free))
            .await
            .unwrap();
        let profile = Profile::new("u@d.e".to_string(), "U".to_string());
        assert!(catalog.launch_tool(&profile, tool.id).await.is_ok());
    }

    #[tokio::test]
    async fn launch_is_refused_for_suspended_accounts() {
        let catalog = service();
        let tool = catalog
            .create_tool(draft("Notes", true, PlanTier::Free))
            .await
            .unwrap();
        let mut profile = Profile::new("u@d.e".to_string(), "U".to_string());
        profile.account_status = AccountStatus::Suspended;
        assert!(matches!(
            catalog.launch_tool(&profile, tool.id).await.unwrap_err(),
            ApiError::Forbidden
        ));
    }

    #[tokio::test]
    async fn deactivating_a_tool_hides_it_from_the_default_listing() {
        let catalog = service();
        let tool = catalog
            .create_tool(draft("Old Tool", true, PlanTier::Free))
            .await
            .unwrap();
        catalog
            .update_tool(
                tool.id,
                ToolUpdate {
                    name: None,
                    description: None,
                    category_id: None,
                    is_active: Some(false),
                    is_free: None,
                    min_plan_required: None,
                },
            )
            .await
            .unwrap();

        assert!(catalog.list_tools(false).await.unwrap().is_empty());
        assert_eq!(catalog.list_tools(true).await.unwrap().len(), 1);
    }
}
