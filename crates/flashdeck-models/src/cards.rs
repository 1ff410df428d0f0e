use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::decks::DeckBrief;
use crate::ids::{CardId, CategoryId, DeckId, TagId};
use crate::taxonomy::Tag;

/// A question/answer card. Ownership and visibility come from its deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Card {
    pub id: CardId,
    pub deck_id: DeckId,
    pub question: String,
    pub answer: String,
    pub category_id: Option<CategoryId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(skip)]
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCardDto {
    #[validate(length(min = 1))]
    #[schema(example = "hablar")]
    pub question: String,
    #[validate(length(min = 1))]
    #[schema(example = "to speak")]
    pub answer: String,
    pub category_id: Option<CategoryId>,
    pub tag_ids: Option<Vec<TagId>>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCardDto {
    #[validate(length(min = 1))]
    pub question: Option<String>,
    #[validate(length(min = 1))]
    pub answer: Option<String>,
    pub category_id: Option<CategoryId>,
    pub tag_ids: Option<Vec<TagId>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CardsResponse {
    pub cards: Vec<Card>,
}

/// A card in the caller-wide listing, with the deck it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OwnedCard {
    #[serde(flatten)]
    pub card: Card,
    pub deck: DeckBrief,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OwnedCardsResponse {
    pub cards: Vec<OwnedCard>,
}
