//! Categories and tags. Names are globally unique.

use async_trait::async_trait;
use flashdeck_models::{Category, CategoryId, Tag, TagId};

use crate::{PgStore, StoreError};

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Category>, StoreError>;

    /// Fails with [`StoreError::Conflict`] on a duplicate name.
    async fn create(&self, name: &str) -> Result<Category, StoreError>;
}

#[async_trait]
pub trait TagStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Tag>, StoreError>;

    /// Fails with [`StoreError::Conflict`] on a duplicate name.
    async fn create(&self, name: &str) -> Result<Tag, StoreError>;
}

#[async_trait]
impl CategoryStore for PgStore {
    async fn list(&self) -> Result<Vec<Category>, StoreError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at FROM categories ORDER BY name ASC",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(categories)
    }

    async fn create(&self, name: &str) -> Result<Category, StoreError> {
        let category = sqlx::query_as::<_, Category>(
            r#"INSERT INTO categories (id, name) VALUES ($1, $2)
               RETURNING id, name, created_at"#,
        )
        .bind(CategoryId::new())
        .bind(name)
        .fetch_one(self.pool())
        .await?;

        Ok(category)
    }
}

#[async_trait]
impl TagStore for PgStore {
    async fn list(&self) -> Result<Vec<Tag>, StoreError> {
        let tags = sqlx::query_as::<_, Tag>("SELECT id, name, created_at FROM tags ORDER BY name ASC")
            .fetch_all(self.pool())
            .await?;

        Ok(tags)
    }

    async fn create(&self, name: &str) -> Result<Tag, StoreError> {
        let tag = sqlx::query_as::<_, Tag>(
            r#"INSERT INTO tags (id, name) VALUES ($1, $2)
               RETURNING id, name, created_at"#,
        )
        .bind(TagId::new())
        .bind(name)
        .fetch_one(self.pool())
        .await?;

        Ok(tag)
    }
}
