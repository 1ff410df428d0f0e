//! Authentication and authorization primitives for Flashdeck.
//!
//! - [`TokenCodec`] issues and verifies access and refresh tokens
//! - [`verify_request_credential`] turns an `Authorization` header into an [`Identity`]
//! - [`authorize`] decides whether an identity may read or modify a resource

pub mod claims;
pub mod clock;
pub mod gate;
pub mod identity;
pub mod jwt;
pub mod policy;
pub mod roles;

pub use claims::{AccessClaims, RefreshClaims, TokenKind};
#[cfg(any(test, feature = "test-utils"))]
pub use clock::ManualClock;
pub use clock::{Clock, SystemClock};
pub use gate::{GateError, verify_request_credential};
pub use identity::Identity;
pub use jwt::{TokenCodec, TokenError};
pub use policy::{AccessDenied, Action, authorize, authorize_shared};
pub use roles::{Role, UnknownRole};
