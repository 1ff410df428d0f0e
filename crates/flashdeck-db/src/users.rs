use async_trait::async_trait;
use flashdeck_models::{NewUser, User, UserId};

use crate::{PgStore, StoreError};

const USER_COLUMNS: &str =
    "id, email, password_hash, username, avatar_url, role, created_at, updated_at";

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Exact, case-sensitive match.
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Fails with [`StoreError::Conflict`] when the email is taken.
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Updates the mutable profile fields. `None` leaves a field unchanged.
    async fn update_profile(
        &self,
        id: UserId,
        username: Option<String>,
    ) -> Result<Option<User>, StoreError>;
}

#[async_trait]
impl UserStore for PgStore {
    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(user)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool())
        .await?;

        Ok(user)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"INSERT INTO users (id, email, password_hash, username, role)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(UserId::new())
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.username)
        .bind(new_user.role.as_str())
        .fetch_one(self.pool())
        .await?;

        Ok(user)
    }

    async fn update_profile(
        &self,
        id: UserId,
        username: Option<String>,
    ) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"UPDATE users
               SET username = COALESCE($2, username), updated_at = NOW()
               WHERE id = $1
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(id)
        .bind(username)
        .fetch_optional(self.pool())
        .await?;

        Ok(user)
    }
}
