//! Administrative commands behind `flashdeck-cli`.
//!
//! The commands take store trait objects so they run against Postgres from
//! the binary and against memory in tests.

use chrono::Utc;
use flashdeck_auth::Role;
use flashdeck_core::AppError;
use flashdeck_db::{CredentialStore, UserStore};
use flashdeck_models::User;
use tracing::info;

use crate::modules::users::service::UserService;

/// Creates an account with any role. This is the only way to obtain a
/// moderator or admin account.
pub async fn create_user(
    users: &dyn UserStore,
    email: &str,
    password: &str,
    role: Role,
    username: Option<String>,
) -> Result<User, AppError> {
    if password.is_empty() {
        return Err(AppError::validation("Password must not be empty"));
    }
    UserService::create_user(users, email, password, role, username).await
}

/// Deletes every refresh credential that has expired. Returns the count.
pub async fn purge_credentials(credentials: &dyn CredentialStore) -> Result<u64, AppError> {
    let purged = credentials.delete_expired(Utc::now()).await?;
    info!(purged, "Expired refresh credentials purged");
    Ok(purged)
}

/// Deletes every refresh credential of the user with `email`, logging them
/// out everywhere once their access tokens lapse.
pub async fn revoke_credentials(
    users: &dyn UserStore,
    credentials: &dyn CredentialStore,
    email: &str,
) -> Result<u64, AppError> {
    let user = users
        .get_by_email(email)
        .await?
        .ok_or_else(|| AppError::not_found(format!("No user with email {email}")))?;

    let revoked = credentials.delete_all_for_user(user.id).await?;
    info!(user_id = %user.id, revoked, "Refresh credentials revoked");
    Ok(revoked)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use flashdeck_core::ErrorCode;
    use flashdeck_db::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_create_elevated_user() {
        let store = MemoryStore::new();
        let user = create_user(&store, "root@x.com", "password1", Role::Admin, None)
            .await
            .unwrap();
        assert_eq!(user.role, Role::Admin);

        let err = create_user(&store, "root@x.com", "password1", Role::User, None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmailExists);
    }

    #[tokio::test]
    async fn test_purge_only_expired() {
        let store = MemoryStore::new();
        let user = create_user(&store, "a@x.com", "password1", Role::User, None)
            .await
            .unwrap();

        let now = Utc::now();
        CredentialStore::create(&store, user.id, "stale", now - Duration::hours(1))
            .await
            .unwrap();
        CredentialStore::create(&store, user.id, "fresh", now + Duration::days(1))
            .await
            .unwrap();

        assert_eq!(purge_credentials(&store).await.unwrap(), 1);
        assert_eq!(store.credential_count().await, 1);
    }

    #[tokio::test]
    async fn test_revoke_by_email() {
        let store = MemoryStore::new();
        let user = create_user(&store, "a@x.com", "password1", Role::User, None)
            .await
            .unwrap();
        let expires = Utc::now() + Duration::days(1);
        CredentialStore::create(&store, user.id, "one", expires)
            .await
            .unwrap();
        CredentialStore::create(&store, user.id, "two", expires)
            .await
            .unwrap();

        assert_eq!(revoke_credentials(&store, &store, "a@x.com").await.unwrap(), 2);

        let err = revoke_credentials(&store, &store, "nobody@x.com")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
