//! # Flashdeck DB
//!
//! Connection pool and persistence for the Flashdeck API.
//!
//! Every resource is reached through an `async_trait` store trait so the
//! services never depend on Postgres directly. [`PgStore`] implements all of
//! them over a [`PgPool`]; `MemoryStore` (feature `memory`) implements them
//! over process memory for tests.

pub mod cards;
pub mod credentials;
pub mod decks;
pub mod error;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
mod tag_links;
pub mod taxonomy;
pub mod users;

use flashdeck_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;

pub use cards::CardStore;
pub use credentials::CredentialStore;
pub use decks::DeckStore;
pub use error::StoreError;
#[cfg(any(test, feature = "memory"))]
pub use memory::MemoryStore;
pub use sqlx::PgPool;
pub use taxonomy::{CategoryStore, TagStore};
pub use users::UserStore;

/// Opens the Postgres pool. Connection errors are returned to the caller,
/// which decides whether startup should abort.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
}

/// Postgres implementation of every store trait.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
