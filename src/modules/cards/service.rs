//! Card operations. A card has no owner or visibility of its own: both come
//! from its deck, so every check here authorizes against the parent deck.

use std::collections::HashMap;

use flashdeck_auth::{Action, Identity};
use flashdeck_core::AppError;
use flashdeck_models::{
    Card, CardId, CreateCardDto, Deck, DeckBrief, DeckId, OwnedCard, UpdateCardDto, UserId,
};
use tracing::{info, instrument};

use crate::modules::decks::service::DeckService;
use crate::state::AppState;
use crate::utils::auth_helpers::require_deck_access;
use crate::utils::store_errors::store_error;

pub struct CardService;

impl CardService {
    /// Loads a card and its deck, or fails with `NOT_FOUND`.
    async fn load_with_deck(state: &AppState, id: CardId) -> Result<(Card, Deck), AppError> {
        let card = state
            .cards
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Card not found"))?;
        let deck = DeckService::load(state, card.deck_id).await?;
        Ok((card, deck))
    }

    #[instrument(skip(state))]
    pub async fn list_for_deck(
        state: &AppState,
        caller: Option<&Identity>,
        deck_id: DeckId,
    ) -> Result<Vec<Card>, AppError> {
        let deck = DeckService::load(state, deck_id).await?;
        require_deck_access(caller, &deck, Action::Read)?;
        Ok(state.cards.list_by_deck(deck_id).await?)
    }

    /// Every card in the caller's own decks, newest first.
    #[instrument(skip(state))]
    pub async fn list_own(
        state: &AppState,
        caller: &Identity,
    ) -> Result<Vec<OwnedCard>, AppError> {
        let owner = UserId::from(caller.user_id);
        let decks: HashMap<DeckId, DeckBrief> = state
            .decks
            .list_by_owner(owner)
            .await?
            .iter()
            .map(|deck| (deck.id, DeckBrief::from(deck)))
            .collect();

        let cards = state
            .cards
            .list_by_owner(owner)
            .await?
            .into_iter()
            .filter_map(|card| {
                let deck = decks.get(&card.deck_id)?.clone();
                Some(OwnedCard { card, deck })
            })
            .collect();

        Ok(cards)
    }

    #[instrument(skip(state, dto))]
    pub async fn create(
        state: &AppState,
        caller: &Identity,
        deck_id: DeckId,
        dto: CreateCardDto,
    ) -> Result<Card, AppError> {
        let deck = DeckService::load(state, deck_id).await?;
        require_deck_access(Some(caller), &deck, Action::Write)?;

        let card = state
            .cards
            .create(deck_id, dto)
            .await
            .map_err(store_error)?;

        info!(card_id = %card.id, deck_id = %deck_id, "Card created");
        Ok(card)
    }

    #[instrument(skip(state))]
    pub async fn get(
        state: &AppState,
        caller: Option<&Identity>,
        id: CardId,
    ) -> Result<Card, AppError> {
        let (card, deck) = Self::load_with_deck(state, id).await?;
        require_deck_access(caller, &deck, Action::Read)?;
        Ok(card)
    }

    #[instrument(skip(state, dto))]
    pub async fn update(
        state: &AppState,
        caller: &Identity,
        id: CardId,
        dto: UpdateCardDto,
    ) -> Result<Card, AppError> {
        let (_, deck) = Self::load_with_deck(state, id).await?;
        require_deck_access(Some(caller), &deck, Action::Write)?;

        state
            .cards
            .update(id, dto)
            .await
            .map_err(store_error)?
            .ok_or_else(|| AppError::not_found("Card not found"))
    }

    #[instrument(skip(state))]
    pub async fn delete(state: &AppState, caller: &Identity, id: CardId) -> Result<(), AppError> {
        let (_, deck) = Self::load_with_deck(state, id).await?;
        require_deck_access(Some(caller), &deck, Action::Write)?;

        if !state.cards.delete(id).await? {
            return Err(AppError::not_found("Card not found"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use flashdeck_auth::{Role, TokenCodec};
    use flashdeck_config::{CorsConfig, JwtConfig};
    use flashdeck_core::ErrorCode;
    use flashdeck_db::MemoryStore;
    use flashdeck_models::{CreateDeckDto, UpdateDeckDto};

    use super::*;

    fn state() -> AppState {
        AppState::from_store(
            MemoryStore::new(),
            TokenCodec::new(&JwtConfig::default()),
            CorsConfig::default(),
        )
    }

    fn identity() -> Identity {
        Identity {
            user_id: uuid::Uuid::new_v4(),
            role: Role::User,
        }
    }

    fn card_dto() -> CreateCardDto {
        CreateCardDto {
            question: "hablar".to_string(),
            answer: "to speak".to_string(),
            category_id: None,
            tag_ids: None,
        }
    }

    async fn deck(state: &AppState, owner: &Identity, is_public: bool) -> Deck {
        DeckService::create(
            state,
            owner,
            CreateDeckDto {
                title: "Verbs".to_string(),
                description: None,
                category_id: None,
                is_public,
                tag_ids: None,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_only_deck_owner_adds_cards() {
        let state = state();
        let owner = identity();
        let stranger = identity();
        let deck = deck(&state, &owner, true).await;

        let err = CardService::create(&state, &stranger, deck.id, card_dto())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        let card = CardService::create(&state, &owner, deck.id, card_dto())
            .await
            .unwrap();
        assert_eq!(card.deck_id, deck.id);
    }

    #[tokio::test]
    async fn test_card_visibility_follows_deck() {
        let state = state();
        let owner = identity();
        let stranger = identity();
        let deck = deck(&state, &owner, false).await;
        let card = CardService::create(&state, &owner, deck.id, card_dto())
            .await
            .unwrap();

        let err = CardService::get(&state, Some(&stranger), card.id)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        DeckService::update(
            &state,
            &owner,
            deck.id,
            UpdateDeckDto {
                is_public: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert!(CardService::get(&state, Some(&stranger), card.id).await.is_ok());
        assert_eq!(
            CardService::list_for_deck(&state, None, deck.id)
                .await
                .unwrap()
                .len(),
            1
        );

        let err = CardService::delete(&state, &stranger, card.id)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn test_missing_card_and_deck() {
        let state = state();
        let owner = identity();

        let err = CardService::get(&state, Some(&owner), CardId::new())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = CardService::create(&state, &owner, DeckId::new(), card_dto())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_list_own_spans_decks_and_skips_public_decks_of_others() {
        let state = state();
        let owner = identity();
        let stranger = identity();
        let verbs = deck(&state, &owner, false).await;
        let nouns = deck(&state, &owner, true).await;
        let foreign = deck(&state, &stranger, true).await;

        CardService::create(&state, &owner, verbs.id, card_dto()).await.unwrap();
        CardService::create(&state, &owner, nouns.id, card_dto()).await.unwrap();
        CardService::create(&state, &stranger, foreign.id, card_dto())
            .await
            .unwrap();

        let cards = CardService::list_own(&state, &owner).await.unwrap();
        assert_eq!(cards.len(), 2);
        assert!(cards.iter().all(|c| c.deck.id == c.card.deck_id));
        assert!(cards.iter().all(|c| c.deck.id != foreign.id));
    }

    #[tokio::test]
    async fn test_card_tags_replace_on_update() {
        let state = state();
        let owner = identity();
        let deck = deck(&state, &owner, false).await;
        let first = state.tags.create("verbs").await.unwrap();
        let second = state.tags.create("irregular").await.unwrap();

        let card = CardService::create(
            &state,
            &owner,
            deck.id,
            CreateCardDto {
                tag_ids: Some(vec![first.id]),
                ..card_dto()
            },
        )
        .await
        .unwrap();
        assert_eq!(card.tags, vec![first]);

        let updated = CardService::update(
            &state,
            &owner,
            card.id,
            UpdateCardDto {
                tag_ids: Some(vec![second.id]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.tags, vec![second]);
        assert_eq!(updated.question, "hablar");
    }
}
