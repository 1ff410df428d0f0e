use flashdeck_auth::{Identity, Role};
use flashdeck_core::{AppError, hash_password};
use flashdeck_db::UserStore;
use flashdeck_models::{NewUser, ProfileResponse, UpdateProfileDto, User, UserId, UserStats};
use tracing::{info, instrument};

use crate::state::AppState;
use crate::utils::store_errors::conflict_as;

pub struct UserService;

impl UserService {
    /// Creates an account directly, with any role. Used by the admin CLI;
    /// the HTTP API only ever creates plain users.
    #[instrument(skip(users, password))]
    pub async fn create_user(
        users: &dyn UserStore,
        email: &str,
        password: &str,
        role: Role,
        username: Option<String>,
    ) -> Result<User, AppError> {
        let password_hash = hash_password(password)?;

        let user = users
            .create(NewUser {
                email: email.to_string(),
                password_hash,
                username,
                role,
            })
            .await
            .map_err(|e| conflict_as(e, AppError::email_exists))?;

        info!(user_id = %user.id, %role, "User created");
        Ok(user)
    }

    #[instrument(skip(state))]
    pub async fn get_profile(
        state: &AppState,
        identity: &Identity,
    ) -> Result<ProfileResponse, AppError> {
        let user_id = UserId::from(identity.user_id);
        let user = state
            .users
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let decks_count = state.decks.count_by_owner(user_id).await?;
        let cards_count = state.cards.count_by_owner(user_id).await?;

        Ok(ProfileResponse {
            id: user.id,
            email: user.email,
            username: user.username,
            avatar_url: user.avatar_url,
            role: user.role,
            stats: UserStats {
                decks_count,
                cards_count,
            },
            created_at: user.created_at,
        })
    }

    #[instrument(skip(state, dto))]
    pub async fn update_profile(
        state: &AppState,
        identity: &Identity,
        dto: UpdateProfileDto,
    ) -> Result<ProfileResponse, AppError> {
        state
            .users
            .update_profile(UserId::from(identity.user_id), dto.username)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        Self::get_profile(state, identity).await
    }
}

#[cfg(test)]
mod tests {
    use flashdeck_auth::TokenCodec;
    use flashdeck_config::{CorsConfig, JwtConfig};
    use flashdeck_core::ErrorCode;
    use flashdeck_db::MemoryStore;
    use flashdeck_models::CreateDeckDto;

    use super::*;

    fn state() -> AppState {
        AppState::from_store(
            MemoryStore::new(),
            TokenCodec::new(&JwtConfig::default()),
            CorsConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_create_user_with_role() {
        let state = state();
        let user = UserService::create_user(
            state.users.as_ref(),
            "admin@x.com",
            "password1",
            Role::Admin,
            Some("root".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(user.role, Role::Admin);

        let err = UserService::create_user(
            state.users.as_ref(),
            "admin@x.com",
            "password1",
            Role::User,
            None,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmailExists);
    }

    #[tokio::test]
    async fn test_profile_counts_owned_decks() {
        let state = state();
        let user = UserService::create_user(
            state.users.as_ref(),
            "a@x.com",
            "password1",
            Role::User,
            None,
        )
        .await
        .unwrap();
        let identity = Identity {
            user_id: user.id.into_inner(),
            role: user.role,
        };

        state
            .decks
            .create(
                user.id,
                CreateDeckDto {
                    title: "Verbs".to_string(),
                    description: None,
                    category_id: None,
                    is_public: false,
                    tag_ids: None,
                },
            )
            .await
            .unwrap();

        let profile = UserService::update_profile(
            &state,
            &identity,
            UpdateProfileDto {
                username: Some("alice".to_string()),
            },
        )
        .await
        .unwrap();

        assert_eq!(profile.username.as_deref(), Some("alice"));
        assert_eq!(profile.stats.decks_count, 1);
        assert_eq!(profile.stats.cards_count, 0);
    }
}
