//! Deck operations. Every access goes through the authorization policy
//! after the deck has been loaded, so a missing deck is `NOT_FOUND` and an
//! existing deck the caller may not touch is `FORBIDDEN`.

use std::collections::HashMap;

use flashdeck_auth::{Action, Identity};
use flashdeck_core::AppError;
use flashdeck_models::{
    CreateDeckDto, Deck, DeckAuthor, DeckId, PublicDeck, PublicDeckDetail, UpdateDeckDto, UserId,
};
use tracing::{info, instrument};

use crate::state::AppState;
use crate::utils::auth_helpers::require_deck_access;
use crate::utils::store_errors::store_error;

pub struct DeckService;

impl DeckService {
    /// Loads a deck or fails with `NOT_FOUND`.
    pub async fn load(state: &AppState, id: DeckId) -> Result<Deck, AppError> {
        state
            .decks
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Deck not found"))
    }

    #[instrument(skip(state))]
    pub async fn list_own(state: &AppState, caller: &Identity) -> Result<Vec<Deck>, AppError> {
        Ok(state
            .decks
            .list_by_owner(UserId::from(caller.user_id))
            .await?)
    }

    #[instrument(skip(state, dto))]
    pub async fn create(
        state: &AppState,
        caller: &Identity,
        dto: CreateDeckDto,
    ) -> Result<Deck, AppError> {
        let deck = state
            .decks
            .create(UserId::from(caller.user_id), dto)
            .await
            .map_err(store_error)?;

        info!(deck_id = %deck.id, "Deck created");
        Ok(deck)
    }

    #[instrument(skip(state))]
    pub async fn get(
        state: &AppState,
        caller: Option<&Identity>,
        id: DeckId,
    ) -> Result<Deck, AppError> {
        let deck = Self::load(state, id).await?;
        require_deck_access(caller, &deck, Action::Read)?;
        Ok(deck)
    }

    #[instrument(skip(state, dto))]
    pub async fn update(
        state: &AppState,
        caller: &Identity,
        id: DeckId,
        dto: UpdateDeckDto,
    ) -> Result<Deck, AppError> {
        let deck = Self::load(state, id).await?;
        require_deck_access(Some(caller), &deck, Action::Write)?;

        state
            .decks
            .update(id, dto)
            .await
            .map_err(store_error)?
            .ok_or_else(|| AppError::not_found("Deck not found"))
    }

    #[instrument(skip(state))]
    pub async fn delete(state: &AppState, caller: &Identity, id: DeckId) -> Result<(), AppError> {
        let deck = Self::load(state, id).await?;
        require_deck_access(Some(caller), &deck, Action::Write)?;

        if !state.decks.delete(id).await? {
            return Err(AppError::not_found("Deck not found"));
        }

        info!(deck_id = %id, "Deck deleted");
        Ok(())
    }

    /// Public decks, newest first, each with its author and card count.
    #[instrument(skip(state))]
    pub async fn list_public(state: &AppState) -> Result<Vec<PublicDeck>, AppError> {
        let decks = state.decks.list_public().await?;

        let mut authors: HashMap<UserId, DeckAuthor> = HashMap::new();
        let mut listed = Vec::with_capacity(decks.len());
        for deck in decks {
            let author = match authors.get(&deck.user_id) {
                Some(author) => author.clone(),
                None => {
                    let author = Self::author(state, deck.user_id).await?;
                    authors.insert(deck.user_id, author.clone());
                    author
                }
            };
            let cards_count = state.cards.count_by_deck(deck.id).await?;
            listed.push(PublicDeck {
                deck,
                author,
                cards_count,
            });
        }

        Ok(listed)
    }

    /// Public browse of one deck. A deck the caller may not read is
    /// reported as `NOT_FOUND` so private decks cannot be discovered here.
    #[instrument(skip(state))]
    pub async fn get_public(
        state: &AppState,
        caller: Option<&Identity>,
        id: DeckId,
    ) -> Result<PublicDeckDetail, AppError> {
        let deck = Self::load(state, id).await?;
        if require_deck_access(caller, &deck, Action::Read).is_err() {
            return Err(AppError::not_found("Deck not found"));
        }

        let author = Self::author(state, deck.user_id).await?;
        let cards = state.cards.list_by_deck(id).await?;
        Ok(PublicDeckDetail {
            deck,
            author,
            cards_count: cards.len() as i64,
            cards,
        })
    }

    async fn author(state: &AppState, owner: UserId) -> Result<DeckAuthor, AppError> {
        let author = match state.users.get_by_id(owner).await? {
            Some(user) => DeckAuthor::from(&user),
            None => DeckAuthor {
                id: owner,
                username: None,
                avatar_url: None,
            },
        };
        Ok(author)
    }
}
