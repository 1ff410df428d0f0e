//! # Flashdeck API
//!
//! A flashcard service backend built with Axum and PostgreSQL. Users own
//! decks of question/answer cards, label them with shared categories and
//! tags, and may publish decks for anonymous browsing.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── flashdeck-core/     # AppError, error codes, password hashing
//! ├── flashdeck-config/   # Environment-driven configuration
//! ├── flashdeck-auth/     # Token codec, request gate, access policy
//! ├── flashdeck-models/   # Records, DTOs and typed ids
//! └── flashdeck-db/       # Store traits, Postgres and in-memory stores
//! src/
//! ├── cli/                # flashdeck-cli commands
//! ├── middleware/         # AuthUser / OptionalAuthUser extractors
//! ├── modules/            # auth, users, decks, cards, taxonomy
//! └── utils/              # Policy and store error helpers
//! ```
//!
//! Each feature module has a `controller.rs` (handlers), `service.rs`
//! (business logic) and `router.rs`.
//!
//! ## Authentication
//!
//! - **Access token**: HS256 JWT, 15 minutes by default, verified statelessly.
//! - **Refresh token**: HS256 JWT signed with a separate secret, 30 days by
//!   default, persisted and single-use. Every refresh deletes the submitted
//!   token and issues a new pair; a replayed token is rejected.
//!
//! ## Authorization
//!
//! Deck owners may read and write their decks. Anyone may read a public
//! deck. Cards inherit both rules from their deck. Categories and tags are
//! readable by anyone and writable by any authenticated caller. Roles are
//! carried in tokens but grant nothing extra.
//!
//! ## API Documentation
//!
//! - Swagger UI: `/swagger-ui`
//! - Scalar: `/scalar`

pub mod cli;
pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

// Re-export workspace crates for convenience
pub use flashdeck_auth;
pub use flashdeck_config;
pub use flashdeck_core;
pub use flashdeck_db;
pub use flashdeck_models;
