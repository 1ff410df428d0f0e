//! # Flashdeck Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: signing secrets and token lifetimes
//! - [`cors`]: allowed CORS origins
//! - [`server`]: bind address
//! - [`database`]: connection string and pool size
//!
//! Every `from_env()` falls back to a fixed default when a variable is unset
//! or unparseable, except `DATABASE_URL`, which is required.
//!
//! # Example
//!
//! ```ignore
//! use flashdeck_config::{CorsConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod duration;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use duration::{MAX_DURATION_SECS, parse_duration_secs};
pub use jwt::JwtConfig;
pub use server::ServerConfig;
