//! Registration, login, refresh rotation and logout.
//!
//! Every refresh credential is created by [`AuthService::issue_tokens`] and
//! ends in one of three terminal states: consumed by a refresh, revoked by
//! logout, or expired.

use flashdeck_auth::Role;
use flashdeck_core::{AppError, hash_password, verify_password};
use flashdeck_models::{
    LoginRequest, LoginResponse, NewUser, RegisterRequest, RegisterResponse, TokenPair, User,
    UserBrief, UserId, UserSummary,
};
use tracing::{debug, info, instrument, warn};

use crate::metrics::{
    track_credentials_revoked, track_login, track_refresh, track_tokens_issued,
    track_user_registered,
};
use crate::state::AppState;
use crate::utils::store_errors::conflict_as;

pub struct AuthService;

impl AuthService {
    #[instrument(skip_all)]
    pub async fn register(
        state: &AppState,
        dto: RegisterRequest,
    ) -> Result<RegisterResponse, AppError> {
        if state.users.get_by_email(&dto.email).await?.is_some() {
            debug!("Registration rejected: email already in use");
            return Err(AppError::email_exists());
        }

        let password_hash = hash_password(&dto.password)?;

        let user = state
            .users
            .create(NewUser {
                email: dto.email,
                password_hash,
                username: None,
                role: Role::User,
            })
            .await
            .map_err(|e| conflict_as(e, AppError::email_exists))?;

        let tokens = Self::issue_tokens(state, &user).await?;

        track_user_registered();
        info!(user_id = %user.id, "User registered");

        Ok(RegisterResponse {
            user: UserBrief::from(&user),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }

    /// Unknown email and wrong password produce the same error.
    #[instrument(skip_all)]
    pub async fn login(state: &AppState, dto: LoginRequest) -> Result<LoginResponse, AppError> {
        let Some(user) = state.users.get_by_email(&dto.email).await? else {
            track_login(false, "unknown_email");
            return Err(AppError::invalid_credentials());
        };

        if !verify_password(&dto.password, &user.password_hash)? {
            track_login(false, "wrong_password");
            debug!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AppError::invalid_credentials());
        }

        let tokens = Self::issue_tokens(state, &user).await?;

        track_login(true, "ok");
        info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse {
            user: UserSummary::from(&user),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }

    /// Exchanges a refresh token for a new pair. The presented token is
    /// deleted before the new pair is issued, and of two concurrent
    /// requests with the same token only the one whose delete removed the
    /// row succeeds.
    #[instrument(skip_all)]
    pub async fn refresh(state: &AppState, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = match state.tokens.verify_refresh(refresh_token) {
            Ok(claims) => claims,
            Err(err) => {
                debug!(reason = %err, "Refresh rejected: token did not verify");
                track_refresh(false, "unverified");
                return Err(AppError::refresh_token_invalid());
            }
        };

        let Some(stored) = state.credentials.find_by_token(refresh_token).await? else {
            debug!(user_id = %claims.sub, "Refresh rejected: credential not found");
            track_refresh(false, "unknown");
            return Err(AppError::refresh_token_invalid());
        };

        if stored.user_id.into_inner() != claims.sub {
            warn!(
                user_id = %claims.sub,
                owner_id = %stored.user_id,
                "Refresh rejected: credential belongs to another user"
            );
            track_refresh(false, "user_mismatch");
            return Err(AppError::refresh_token_invalid());
        }

        if stored.is_expired_at(state.tokens.now()) {
            debug!(user_id = %stored.user_id, "Refresh rejected: credential expired");
            state.credentials.delete_by_token(refresh_token).await?;
            track_refresh(false, "expired");
            return Err(AppError::refresh_token_invalid());
        }

        let Some(user) = state.users.get_by_id(stored.user_id).await? else {
            track_refresh(false, "unknown_user");
            return Err(AppError::refresh_token_invalid());
        };

        if !state.credentials.delete_by_token(refresh_token).await? {
            warn!(user_id = %user.id, "Refresh rejected: credential already consumed");
            track_refresh(false, "consumed");
            return Err(AppError::refresh_token_invalid());
        }

        let tokens = Self::issue_tokens(state, &user).await?;

        track_refresh(true, "ok");
        info!(user_id = %user.id, "Refresh token rotated");

        Ok(tokens)
    }

    /// Best-effort revocation of one of the caller's refresh tokens. An
    /// unknown token, or one belonging to someone else, is ignored.
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn logout(
        state: &AppState,
        user_id: UserId,
        refresh_token: Option<&str>,
    ) -> Result<(), AppError> {
        let Some(token) = refresh_token else {
            return Ok(());
        };

        let removed = match state.credentials.find_by_token(token).await? {
            Some(stored) if stored.user_id == user_id => {
                state.credentials.delete_by_token(token).await?
            }
            _ => false,
        };
        if removed {
            track_credentials_revoked(1);
        }
        debug!(removed, "Logout processed");

        Ok(())
    }

    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn logout_all(state: &AppState, user_id: UserId) -> Result<u64, AppError> {
        let revoked = state.credentials.delete_all_for_user(user_id).await?;
        track_credentials_revoked(revoked);
        info!(revoked, "Revoked all refresh credentials");
        Ok(revoked)
    }

    /// Issues an access/refresh pair and persists the refresh credential.
    /// This is the only place credentials are created.
    pub async fn issue_tokens(state: &AppState, user: &User) -> Result<TokenPair, AppError> {
        let access_token = state.tokens.issue_access(user.id.into_inner(), user.role)?;
        let (refresh_token, expires_at) = state.tokens.issue_refresh(user.id.into_inner())?;

        state
            .credentials
            .create(user.id, &refresh_token, expires_at)
            .await?;

        track_tokens_issued();

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}
