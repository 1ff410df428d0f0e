use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use flashdeck_auth::{GateError, Identity, verify_request_credential};
use flashdeck_core::AppError;

use crate::metrics::track_token_validation;
use crate::state::AppState;

/// Extractor that requires a valid access token and yields the caller.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Identity);

/// Like [`AuthUser`] but yields `None` when no `Authorization` header is sent.
/// A header that is present but invalid is still rejected.
#[derive(Debug, Clone, Copy)]
pub struct OptionalAuthUser(pub Option<Identity>);

fn gate_rejection(err: GateError) -> AppError {
    match err {
        GateError::Missing => AppError::unauthorized("Missing authorization header"),
        GateError::Malformed => AppError::unauthorized("Invalid authorization header format"),
        GateError::Invalid(reason) => {
            tracing::debug!(%reason, "Rejected access token");
            AppError::invalid_token("Invalid or expired access token")
        }
    }
}

fn authenticate(parts: &Parts, state: &AppState) -> Result<Identity, GateError> {
    let header_value = match parts.headers.get(header::AUTHORIZATION) {
        None => None,
        Some(value) => Some(value.to_str().map_err(|_| GateError::Malformed)?),
    };

    let result = verify_request_credential(&state.tokens, header_value);
    if !matches!(result, Err(GateError::Missing)) {
        track_token_validation(result.is_ok());
    }
    result
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state)
            .map(AuthUser)
            .map_err(gate_rejection)
    }
}

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match authenticate(parts, state) {
            Ok(identity) => Ok(OptionalAuthUser(Some(identity))),
            Err(GateError::Missing) => Ok(OptionalAuthUser(None)),
            Err(err) => Err(gate_rejection(err)),
        }
    }
}
