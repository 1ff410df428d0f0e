//! Deck entity and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::cards::Card;
use crate::ids::{CategoryId, DeckId, TagId, UserId};
use crate::taxonomy::Tag;
use crate::users::DeckAuthor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Deck {
    pub id: DeckId,
    /// Owner. Never changes after creation.
    pub user_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Filled in by the store from `deck_tags`, ordered by name.
    #[sqlx(skip)]
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateDeckDto {
    #[validate(length(min = 1, max = 255))]
    #[schema(example = "Spanish verbs")]
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub is_public: bool,
    pub tag_ids: Option<Vec<TagId>>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateDeckDto {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub is_public: Option<bool>,
    /// Replaces the whole tag set when present; `[]` clears it.
    pub tag_ids: Option<Vec<TagId>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DecksResponse {
    pub decks: Vec<Deck>,
}

/// Minimal deck reference carried by card listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeckBrief {
    pub id: DeckId,
    pub title: String,
}

impl From<&Deck> for DeckBrief {
    fn from(deck: &Deck) -> Self {
        Self {
            id: deck.id,
            title: deck.title.clone(),
        }
    }
}

/// A public deck as listed by `GET /public/decks`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicDeck {
    #[serde(flatten)]
    pub deck: Deck,
    pub author: DeckAuthor,
    pub cards_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicDecksResponse {
    pub decks: Vec<PublicDeck>,
}

/// `GET /public/decks/{id}` body: the deck with its cards inlined.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicDeckDetail {
    #[serde(flatten)]
    pub deck: Deck,
    pub author: DeckAuthor,
    pub cards_count: i64,
    pub cards: Vec<Card>,
}
