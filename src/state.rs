use std::sync::Arc;

use flashdeck_auth::TokenCodec;
use flashdeck_config::{CorsConfig, DatabaseConfig, JwtConfig};
use flashdeck_db::{
    CardStore, CategoryStore, CredentialStore, DeckStore, PgStore, TagStore, UserStore,
    init_db_pool,
};

/// Shared state handed to every handler.
///
/// Stores are trait objects so the same router runs over Postgres in
/// production and over memory in tests.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub credentials: Arc<dyn CredentialStore>,
    pub decks: Arc<dyn DeckStore>,
    pub cards: Arc<dyn CardStore>,
    pub categories: Arc<dyn CategoryStore>,
    pub tags: Arc<dyn TagStore>,
    pub tokens: TokenCodec,
    pub cors_config: CorsConfig,
}

impl AppState {
    /// Builds the state from one value that implements every store.
    pub fn from_store<S>(store: S, tokens: TokenCodec, cors_config: CorsConfig) -> Self
    where
        S: UserStore + CredentialStore + DeckStore + CardStore + CategoryStore + TagStore + 'static,
    {
        let store = Arc::new(store);
        Self {
            users: store.clone(),
            credentials: store.clone(),
            decks: store.clone(),
            cards: store.clone(),
            categories: store.clone(),
            tags: store,
            tokens,
            cors_config,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tokens", &self.tokens)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

pub async fn init_app_state(
    db_config: &DatabaseConfig,
    jwt_config: &JwtConfig,
    cors_config: CorsConfig,
) -> Result<AppState, sqlx::Error> {
    let pool = init_db_pool(db_config).await?;

    Ok(AppState::from_store(
        PgStore::new(pool),
        TokenCodec::new(jwt_config),
        cors_config,
    ))
}
