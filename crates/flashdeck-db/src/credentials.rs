//! Refresh credential persistence.
//!
//! Credentials are write-once: there is no update. Single use is enforced by
//! the caller through [`CredentialStore::delete_by_token`], whose boolean
//! result tells concurrent consumers of the same token which one won.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use flashdeck_models::{CredentialId, RefreshCredential, UserId};

use crate::{PgStore, StoreError};

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn create(
        &self,
        user_id: UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshCredential, StoreError>;

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshCredential>, StoreError>;

    /// `true` if this call removed the row.
    async fn delete_by_token(&self, token: &str) -> Result<bool, StoreError>;

    async fn delete_all_for_user(&self, user_id: UserId) -> Result<u64, StoreError>;

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError>;
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn create(
        &self,
        user_id: UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshCredential, StoreError> {
        let credential = sqlx::query_as::<_, RefreshCredential>(
            r#"INSERT INTO refresh_tokens (id, user_id, token, expires_at)
               VALUES ($1, $2, $3, $4)
               RETURNING id, user_id, token, expires_at, created_at"#,
        )
        .bind(CredentialId::new())
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .fetch_one(self.pool())
        .await?;

        Ok(credential)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshCredential>, StoreError> {
        let credential = sqlx::query_as::<_, RefreshCredential>(
            r#"SELECT id, user_id, token, expires_at, created_at
               FROM refresh_tokens
               WHERE token = $1"#,
        )
        .bind(token)
        .fetch_optional(self.pool())
        .await?;

        Ok(credential)
    }

    async fn delete_by_token(&self, token: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE token = $1")
            .bind(token)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_for_user(&self, user_id: UserId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at <= $1")
            .bind(now)
            .execute(self.pool())
            .await?;

        tracing::debug!(purged = result.rows_affected(), "Deleted expired refresh tokens");
        Ok(result.rows_affected())
    }
}
