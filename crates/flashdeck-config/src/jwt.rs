//! Token signing configuration.
//!
//! # Environment Variables
//!
//! - `JWT_ACCESS_SECRET`: secret for access tokens
//! - `JWT_REFRESH_SECRET`: secret for refresh tokens
//! - `JWT_ACCESS_TTL`: access token lifetime (default: `15m`)
//! - `JWT_REFRESH_TTL`: refresh token lifetime (default: `30d`)
//!
//! Lifetimes accept bare seconds or an `s`/`m`/`h`/`d` suffix. See
//! [`parse_duration_secs`](crate::duration::parse_duration_secs).

use std::env;

use crate::duration::parse_duration_secs;

pub const DEFAULT_ACCESS_TOKEN_TTL: i64 = 15 * 60;
pub const DEFAULT_REFRESH_TOKEN_TTL: i64 = 30 * 24 * 60 * 60;

#[derive(Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    /// Access token lifetime in seconds
    pub access_token_ttl: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_ttl: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            access_secret: env::var("JWT_ACCESS_SECRET")
                .unwrap_or_else(|_| "change-me-access-secret".to_string()),
            refresh_secret: env::var("JWT_REFRESH_SECRET")
                .unwrap_or_else(|_| "change-me-refresh-secret".to_string()),
            access_token_ttl: env::var("JWT_ACCESS_TTL")
                .ok()
                .and_then(|v| parse_duration_secs(&v))
                .unwrap_or(DEFAULT_ACCESS_TOKEN_TTL),
            refresh_token_ttl: env::var("JWT_REFRESH_TTL")
                .ok()
                .and_then(|v| parse_duration_secs(&v))
                .unwrap_or(DEFAULT_REFRESH_TOKEN_TTL),
        }
    }

    /// `false` when both token kinds are signed with the same secret.
    pub fn secrets_are_distinct(&self) -> bool {
        self.access_secret != self.refresh_secret
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: "change-me-access-secret".to_string(),
            refresh_secret: "change-me-refresh-secret".to_string(),
            access_token_ttl: DEFAULT_ACCESS_TOKEN_TTL,
            refresh_token_ttl: DEFAULT_REFRESH_TOKEN_TTL,
        }
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("access_secret", &"<redacted>")
            .field("refresh_secret", &"<redacted>")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .finish()
    }
}
