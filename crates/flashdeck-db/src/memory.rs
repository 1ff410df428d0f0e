//! Process-memory implementation of every store trait.
//!
//! Behaves like the Postgres schema where the services can observe it:
//! unique emails and label names, cascade from decks to cards, and an atomic
//! delete-by-token that only one caller can win. Tags are stored already
//! resolved on each deck and card, since a tag never changes once created.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use flashdeck_models::{
    Card, CardId, Category, CategoryId, CreateCardDto, CreateDeckDto, CredentialId, Deck, DeckId,
    NewUser, RefreshCredential, Tag, TagId, UpdateCardDto, UpdateDeckDto, User, UserId,
};
use tokio::sync::RwLock;

use crate::tag_links::distinct_tag_ids;
use crate::{CardStore, CategoryStore, CredentialStore, DeckStore, StoreError, TagStore, UserStore};

#[derive(Default)]
struct MemoryState {
    users: HashMap<UserId, User>,
    credentials: HashMap<String, RefreshCredential>,
    decks: HashMap<DeckId, Deck>,
    cards: HashMap<CardId, Card>,
    categories: Vec<Category>,
    tags: Vec<Tag>,
}

impl MemoryState {
    /// `true` when the id is absent or names an existing category.
    fn has_category(&self, id: Option<CategoryId>) -> bool {
        id.is_none_or(|id| self.categories.iter().any(|c| c.id == id))
    }

    /// Looks up a requested tag set, ordered by name. `None` passes through.
    fn resolve_tags(&self, ids: Option<&[TagId]>) -> Result<Option<Vec<Tag>>, StoreError> {
        let Some(ids) = ids else {
            return Ok(None);
        };

        let mut tags = distinct_tag_ids(ids)
            .into_iter()
            .map(|id| {
                self.tags
                    .iter()
                    .find(|t| t.id == id)
                    .cloned()
                    .ok_or(StoreError::MissingReference)
            })
            .collect::<Result<Vec<_>, _>>()?;
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Some(tags))
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored refresh credentials.
    pub async fn credential_count(&self) -> usize {
        self.state.read().await.credentials.len()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

fn sorted_newest_first(mut decks: Vec<Deck>) -> Vec<Deck> {
    decks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    decks
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.email == new_user.email) {
            return Err(StoreError::Conflict);
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: new_user.email,
            password_hash: new_user.password_hash,
            username: new_user.username,
            avatar_url: None,
            role: new_user.role,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: UserId,
        username: Option<String>,
    ) -> Result<Option<User>, StoreError> {
        let mut state = self.state.write().await;
        let Some(user) = state.users.get_mut(&id) else {
            return Ok(None);
        };

        if username.is_some() {
            user.username = username;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn create(
        &self,
        user_id: UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshCredential, StoreError> {
        let mut state = self.state.write().await;
        if state.credentials.contains_key(token) {
            return Err(StoreError::Conflict);
        }

        let credential = RefreshCredential {
            id: CredentialId::new(),
            user_id,
            token: token.to_string(),
            expires_at,
            created_at: Utc::now(),
        };
        state
            .credentials
            .insert(token.to_string(), credential.clone());
        Ok(credential)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshCredential>, StoreError> {
        Ok(self.state.read().await.credentials.get(token).cloned())
    }

    async fn delete_by_token(&self, token: &str) -> Result<bool, StoreError> {
        Ok(self.state.write().await.credentials.remove(token).is_some())
    }

    async fn delete_all_for_user(&self, user_id: UserId) -> Result<u64, StoreError> {
        let mut state = self.state.write().await;
        let before = state.credentials.len();
        state.credentials.retain(|_, c| c.user_id != user_id);
        Ok((before - state.credentials.len()) as u64)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let mut state = self.state.write().await;
        let before = state.credentials.len();
        state.credentials.retain(|_, c| !c.is_expired_at(now));
        Ok((before - state.credentials.len()) as u64)
    }
}

#[async_trait]
impl DeckStore for MemoryStore {
    async fn create(&self, owner: UserId, dto: CreateDeckDto) -> Result<Deck, StoreError> {
        let mut state = self.state.write().await;
        if !state.has_category(dto.category_id) {
            return Err(StoreError::MissingReference);
        }
        let tags = state.resolve_tags(dto.tag_ids.as_deref())?;

        let now = Utc::now();
        let deck = Deck {
            id: DeckId::new(),
            user_id: owner,
            title: dto.title,
            description: dto.description,
            category_id: dto.category_id,
            is_public: dto.is_public,
            created_at: now,
            updated_at: now,
            tags: tags.unwrap_or_default(),
        };
        state.decks.insert(deck.id, deck.clone());
        Ok(deck)
    }

    async fn get(&self, id: DeckId) -> Result<Option<Deck>, StoreError> {
        Ok(self.state.read().await.decks.get(&id).cloned())
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Deck>, StoreError> {
        let state = self.state.read().await;
        let decks = state
            .decks
            .values()
            .filter(|d| d.user_id == owner)
            .cloned()
            .collect();
        Ok(sorted_newest_first(decks))
    }

    async fn list_public(&self) -> Result<Vec<Deck>, StoreError> {
        let state = self.state.read().await;
        let decks = state.decks.values().filter(|d| d.is_public).cloned().collect();
        Ok(sorted_newest_first(decks))
    }

    async fn update(&self, id: DeckId, dto: UpdateDeckDto) -> Result<Option<Deck>, StoreError> {
        let mut state = self.state.write().await;
        if !state.has_category(dto.category_id) {
            return Err(StoreError::MissingReference);
        }
        let tags = state.resolve_tags(dto.tag_ids.as_deref())?;

        let Some(deck) = state.decks.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = dto.title {
            deck.title = title;
        }
        if dto.description.is_some() {
            deck.description = dto.description;
        }
        if dto.category_id.is_some() {
            deck.category_id = dto.category_id;
        }
        if let Some(is_public) = dto.is_public {
            deck.is_public = is_public;
        }
        if let Some(tags) = tags {
            deck.tags = tags;
        }
        deck.updated_at = Utc::now();
        Ok(Some(deck.clone()))
    }

    async fn delete(&self, id: DeckId) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        let removed = state.decks.remove(&id).is_some();
        if removed {
            state.cards.retain(|_, c| c.deck_id != id);
        }
        Ok(removed)
    }

    async fn count_by_owner(&self, owner: UserId) -> Result<i64, StoreError> {
        let state = self.state.read().await;
        Ok(state.decks.values().filter(|d| d.user_id == owner).count() as i64)
    }
}

#[async_trait]
impl CardStore for MemoryStore {
    async fn create(&self, deck_id: DeckId, dto: CreateCardDto) -> Result<Card, StoreError> {
        let mut state = self.state.write().await;
        if !state.decks.contains_key(&deck_id) || !state.has_category(dto.category_id) {
            return Err(StoreError::MissingReference);
        }
        let tags = state.resolve_tags(dto.tag_ids.as_deref())?;

        let now = Utc::now();
        let card = Card {
            id: CardId::new(),
            deck_id,
            question: dto.question,
            answer: dto.answer,
            category_id: dto.category_id,
            created_at: now,
            updated_at: now,
            tags: tags.unwrap_or_default(),
        };
        state.cards.insert(card.id, card.clone());
        Ok(card)
    }

    async fn get(&self, id: CardId) -> Result<Option<Card>, StoreError> {
        Ok(self.state.read().await.cards.get(&id).cloned())
    }

    async fn list_by_deck(&self, deck_id: DeckId) -> Result<Vec<Card>, StoreError> {
        let state = self.state.read().await;
        let mut cards: Vec<Card> = state
            .cards
            .values()
            .filter(|c| c.deck_id == deck_id)
            .cloned()
            .collect();
        cards.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(cards)
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Card>, StoreError> {
        let state = self.state.read().await;
        let mut cards: Vec<Card> = state
            .cards
            .values()
            .filter(|c| {
                state
                    .decks
                    .get(&c.deck_id)
                    .is_some_and(|d| d.user_id == owner)
            })
            .cloned()
            .collect();
        cards.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(cards)
    }

    async fn count_by_deck(&self, deck_id: DeckId) -> Result<i64, StoreError> {
        let state = self.state.read().await;
        Ok(state.cards.values().filter(|c| c.deck_id == deck_id).count() as i64)
    }

    async fn update(&self, id: CardId, dto: UpdateCardDto) -> Result<Option<Card>, StoreError> {
        let mut state = self.state.write().await;
        if !state.has_category(dto.category_id) {
            return Err(StoreError::MissingReference);
        }
        let tags = state.resolve_tags(dto.tag_ids.as_deref())?;

        let Some(card) = state.cards.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(question) = dto.question {
            card.question = question;
        }
        if let Some(answer) = dto.answer {
            card.answer = answer;
        }
        if dto.category_id.is_some() {
            card.category_id = dto.category_id;
        }
        if let Some(tags) = tags {
            card.tags = tags;
        }
        card.updated_at = Utc::now();
        Ok(Some(card.clone()))
    }

    async fn delete(&self, id: CardId) -> Result<bool, StoreError> {
        Ok(self.state.write().await.cards.remove(&id).is_some())
    }

    async fn count_by_owner(&self, owner: UserId) -> Result<i64, StoreError> {
        let state = self.state.read().await;
        let count = state
            .cards
            .values()
            .filter(|c| {
                state
                    .decks
                    .get(&c.deck_id)
                    .is_some_and(|d| d.user_id == owner)
            })
            .count();
        Ok(count as i64)
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Category>, StoreError> {
        let mut categories = self.state.read().await.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn create(&self, name: &str) -> Result<Category, StoreError> {
        let mut state = self.state.write().await;
        if state.categories.iter().any(|c| c.name == name) {
            return Err(StoreError::Conflict);
        }

        let category = Category {
            id: CategoryId::new(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        state.categories.push(category.clone());
        Ok(category)
    }
}

#[async_trait]
impl TagStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Tag>, StoreError> {
        let mut tags = self.state.read().await.tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn create(&self, name: &str) -> Result<Tag, StoreError> {
        let mut state = self.state.write().await;
        if state.tags.iter().any(|t| t.name == name) {
            return Err(StoreError::Conflict);
        }

        let tag = Tag {
            id: TagId::new(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        state.tags.push(tag.clone());
        Ok(tag)
    }
}
