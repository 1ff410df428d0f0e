//! Application error type with HTTP response conversion.
//!
//! Every failure that reaches a client is an [`AppError`]: an [`ErrorCode`]
//! from the fixed taxonomy, the HTTP status that code maps to, and the
//! underlying [`anyhow::Error`] carrying the message.
//!
//! # Response Format
//!
//! ```json
//! { "error": { "code": "REFRESH_TOKEN_INVALID", "message": "Invalid refresh token" } }
//! ```
//!
//! Internal errors are logged and answered with a generic message so that
//! database details never leak to clients.

use std::fmt;

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

/// Machine-readable error codes returned in every error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request body parsed but failed validation rules
    ValidationError,
    /// Request body could not be parsed
    BadRequest,
    /// Login failed; identical for unknown email and wrong password
    InvalidCredentials,
    /// Registration with an email that is already taken
    EmailExists,
    /// Refresh token failed verification, was consumed, revoked or expired
    RefreshTokenInvalid,
    /// Bearer credential missing or malformed
    Unauthorized,
    /// Bearer credential present but failed verification
    InvalidToken,
    /// Authenticated but not entitled to the resource or action
    Forbidden,
    /// Resource does not exist
    NotFound,
    /// Unique name collision on a non-user resource
    AlreadyExists,
    /// Persistence or other internal failure
    InternalServerError,
}

impl ErrorCode {
    /// HTTP status the code is reported with.
    pub fn status(self) -> StatusCode {
        match self {
            Self::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials
            | Self::RefreshTokenInvalid
            | Self::Unauthorized
            | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::EmailExists | Self::AlreadyExists => StatusCode::CONFLICT,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::EmailExists => "EMAIL_EXISTS",
            Self::RefreshTokenInvalid => "REFRESH_TOKEN_INVALID",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error body as documented in the OpenAPI schema.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorPayload {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub code: ErrorCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(code: ErrorCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status: code.status(),
            code,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorCode::InternalServerError, err)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, anyhow!(message.into()))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, anyhow!(message.into()))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, anyhow!(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, anyhow!(message.into()))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, anyhow!(message.into()))
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidToken, anyhow!(message.into()))
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AlreadyExists, anyhow!(message.into()))
    }

    /// Login failure. The message is the same whatever the cause.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials, anyhow!("Invalid email or password"))
    }

    pub fn email_exists() -> Self {
        Self::new(
            ErrorCode::EmailExists,
            anyhow!("A user with this email already exists"),
        )
    }

    pub fn refresh_token_invalid() -> Self {
        Self::new(ErrorCode::RefreshTokenInvalid, anyhow!("Invalid refresh token"))
    }

    pub fn is_internal(&self) -> bool {
        self.code == ErrorCode::InternalServerError
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.is_internal() {
            tracing::error!(error = ?self.error, "Internal server error");
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        };

        let body = Json(json!({
            "error": {
                "code": self.code,
                "message": message,
            }
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
