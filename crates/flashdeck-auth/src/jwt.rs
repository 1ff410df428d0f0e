//! Signing and verification of access and refresh tokens.
//!
//! Access and refresh tokens are HS256 JWTs signed with two independent
//! secrets. Expiry is judged against the codec's [`Clock`] rather than the
//! process clock, so `exp` is required by the decoder but checked here.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use flashdeck_config::JwtConfig;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

use crate::claims::{AccessClaims, RefreshClaims, TimedClaims, TokenKind};
use crate::clock::{Clock, SystemClock};
use crate::roles::Role;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token is malformed or its signature is invalid")]
    Malformed,
    #[error("token has expired")]
    Expired,
    #[error("expected {expected} token, got {actual}")]
    WrongKind {
        expected: TokenKind,
        actual: TokenKind,
    },
    #[error("token lifetime does not fit in a timestamp")]
    LifetimeOutOfRange,
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

#[derive(Clone)]
pub struct TokenCodec {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    pub fn new(config: &JwtConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &JwtConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_ttl: ttl_from_secs(config.access_token_ttl),
            refresh_ttl: ttl_from_secs(config.refresh_token_ttl),
            clock,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    pub fn issue_access(&self, user_id: Uuid, role: Role) -> Result<String, TokenError> {
        let now = self.now();
        let claims = AccessClaims {
            sub: user_id,
            role,
            kind: TokenKind::Access,
            iat: now.timestamp(),
            exp: expiry_after(now, self.access_ttl)?.timestamp(),
            jti: Uuid::new_v4(),
        };

        encode(&Header::default(), &claims, &self.access_encoding).map_err(TokenError::Signing)
    }

    /// Returns the token together with the instant it stops being valid,
    /// which is what the credential store records.
    pub fn issue_refresh(&self, user_id: Uuid) -> Result<(String, DateTime<Utc>), TokenError> {
        let now = self.now();
        let expires_at = expiry_after(now, self.refresh_ttl)?;
        let claims = RefreshClaims {
            sub: user_id,
            kind: TokenKind::Refresh,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.refresh_encoding)
            .map_err(TokenError::Signing)?;
        Ok((token, expires_at))
    }

    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.verify(token, &self.access_decoding, TokenKind::Access)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        self.verify(token, &self.refresh_decoding, TokenKind::Refresh)
    }

    fn verify<C>(&self, token: &str, key: &DecodingKey, expected: TokenKind) -> Result<C, TokenError>
    where
        C: DeserializeOwned + TimedClaims,
    {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<C>(token, key, &validation)
            .map_err(|_| TokenError::Malformed)?
            .claims;

        if claims.kind() != expected {
            return Err(TokenError::WrongKind {
                expected,
                actual: claims.kind(),
            });
        }

        if claims.exp() <= self.now().timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

// Out-of-range lifetimes saturate here and fail at issue time instead.
fn ttl_from_secs(secs: i64) -> Duration {
    Duration::try_seconds(secs).unwrap_or(Duration::MAX)
}

fn expiry_after(now: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, TokenError> {
    now.checked_add_signed(ttl).ok_or(TokenError::LifetimeOutOfRange)
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
