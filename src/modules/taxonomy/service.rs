//! Categories and tags are shared labels: anyone may list them, any
//! authenticated caller may add one.

use flashdeck_auth::{Action, Identity};
use flashdeck_core::AppError;
use flashdeck_models::{Category, Tag};
use tracing::{info, instrument};

use crate::state::AppState;
use crate::utils::auth_helpers::require_shared_access;
use crate::utils::store_errors::conflict_as;

pub struct TaxonomyService;

impl TaxonomyService {
    #[instrument(skip(state))]
    pub async fn list_categories(state: &AppState) -> Result<Vec<Category>, AppError> {
        require_shared_access(None, Action::Read)?;
        Ok(state.categories.list().await?)
    }

    #[instrument(skip(state))]
    pub async fn create_category(
        state: &AppState,
        caller: Option<&Identity>,
        name: &str,
    ) -> Result<Category, AppError> {
        require_shared_access(caller, Action::Write)?;

        let category = state.categories.create(name.trim()).await.map_err(|e| {
            conflict_as(e, || {
                AppError::already_exists(format!("Category '{}' already exists", name.trim()))
            })
        })?;

        info!(category_id = %category.id, "Category created");
        Ok(category)
    }

    #[instrument(skip(state))]
    pub async fn list_tags(state: &AppState) -> Result<Vec<Tag>, AppError> {
        require_shared_access(None, Action::Read)?;
        Ok(state.tags.list().await?)
    }

    #[instrument(skip(state))]
    pub async fn create_tag(
        state: &AppState,
        caller: Option<&Identity>,
        name: &str,
    ) -> Result<Tag, AppError> {
        require_shared_access(caller, Action::Write)?;

        let tag = state.tags.create(name.trim()).await.map_err(|e| {
            conflict_as(e, || {
                AppError::already_exists(format!("Tag '{}' already exists", name.trim()))
            })
        })?;

        info!(tag_id = %tag.id, "Tag created");
        Ok(tag)
    }
}
