//! # Flashdeck Core
//!
//! Foundational types shared by every Flashdeck crate:
//!
//! - [`errors`]: the [`AppError`] type, its [`ErrorCode`] taxonomy and HTTP conversion
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use flashdeck_core::{AppError, hash_password, verify_password};
//!
//! let digest = hash_password("password1")?;
//! if !verify_password("password1", &digest)? {
//!     return Err(AppError::invalid_credentials());
//! }
//! ```

pub mod errors;
pub mod password;

pub use errors::{AppError, ErrorCode, ErrorPayload, ErrorResponse};
pub use password::{hash_password, verify_password};
