//! Bearer credential checking, independent of the HTTP framework.

use thiserror::Error;

use crate::identity::Identity;
use crate::jwt::{TokenCodec, TokenError};

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Error)]
pub enum GateError {
    #[error("missing authorization header")]
    Missing,
    #[error("authorization header must be `Bearer <token>`")]
    Malformed,
    #[error("invalid access token: {0}")]
    Invalid(#[from] TokenError),
}

impl GateError {
    /// `true` when a bearer token was presented but did not verify.
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, GateError::Invalid(_))
    }
}

/// Resolves the value of an `Authorization` header to a caller identity.
pub fn verify_request_credential(
    codec: &TokenCodec,
    header_value: Option<&str>,
) -> Result<Identity, GateError> {
    let value = header_value.ok_or(GateError::Missing)?;
    let token = value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(GateError::Malformed)?;

    let claims = codec.verify_access(token)?;
    Ok(Identity::from(claims))
}
