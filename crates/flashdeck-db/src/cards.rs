use async_trait::async_trait;
use flashdeck_models::{Card, CardId, CreateCardDto, DeckId, UpdateCardDto, UserId};

use crate::tag_links::{TagLink, load_tags, replace_tags};
use crate::{PgStore, StoreError};

const CARD_COLUMNS: &str = "id, deck_id, question, answer, category_id, created_at, updated_at";

/// Like [`DeckStore`](crate::DeckStore), returned cards carry their tags and
/// unknown tag ids are a [`StoreError::MissingReference`].
#[async_trait]
pub trait CardStore: Send + Sync {
    async fn create(&self, deck_id: DeckId, dto: CreateCardDto) -> Result<Card, StoreError>;

    async fn get(&self, id: CardId) -> Result<Option<Card>, StoreError>;

    /// Oldest first.
    async fn list_by_deck(&self, deck_id: DeckId) -> Result<Vec<Card>, StoreError>;

    /// Cards across every deck the user owns, newest first.
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Card>, StoreError>;

    async fn count_by_deck(&self, deck_id: DeckId) -> Result<i64, StoreError>;

    async fn update(&self, id: CardId, dto: UpdateCardDto) -> Result<Option<Card>, StoreError>;

    async fn delete(&self, id: CardId) -> Result<bool, StoreError>;

    /// Cards across every deck the user owns.
    async fn count_by_owner(&self, owner: UserId) -> Result<i64, StoreError>;
}

#[async_trait]
impl CardStore for PgStore {
    async fn create(&self, deck_id: DeckId, dto: CreateCardDto) -> Result<Card, StoreError> {
        let mut tx = self.pool().begin().await?;

        let mut card = sqlx::query_as::<_, Card>(&format!(
            r#"INSERT INTO cards (id, deck_id, question, answer, category_id)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {CARD_COLUMNS}"#
        ))
        .bind(CardId::new())
        .bind(deck_id)
        .bind(&dto.question)
        .bind(&dto.answer)
        .bind(dto.category_id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(tag_ids) = &dto.tag_ids {
            replace_tags(&mut *tx, TagLink::Card, card.id.into_inner(), tag_ids).await?;
        }
        tx.commit().await?;

        self.attach_card_tags(std::slice::from_mut(&mut card)).await?;
        Ok(card)
    }

    async fn get(&self, id: CardId) -> Result<Option<Card>, StoreError> {
        let mut card = sqlx::query_as::<_, Card>(&format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        if let Some(card) = card.as_mut() {
            self.attach_card_tags(std::slice::from_mut(card)).await?;
        }
        Ok(card)
    }

    async fn list_by_deck(&self, deck_id: DeckId) -> Result<Vec<Card>, StoreError> {
        let mut cards = sqlx::query_as::<_, Card>(&format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE deck_id = $1 ORDER BY created_at ASC"
        ))
        .bind(deck_id)
        .fetch_all(self.pool())
        .await?;

        self.attach_card_tags(&mut cards).await?;
        Ok(cards)
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Card>, StoreError> {
        let mut cards = sqlx::query_as::<_, Card>(
            r#"SELECT c.id, c.deck_id, c.question, c.answer, c.category_id,
                      c.created_at, c.updated_at
               FROM cards c
               JOIN decks d ON d.id = c.deck_id
               WHERE d.user_id = $1
               ORDER BY c.created_at DESC"#,
        )
        .bind(owner)
        .fetch_all(self.pool())
        .await?;

        self.attach_card_tags(&mut cards).await?;
        Ok(cards)
    }

    async fn count_by_deck(&self, deck_id: DeckId) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cards WHERE deck_id = $1")
            .bind(deck_id)
            .fetch_one(self.pool())
            .await?;

        Ok(count)
    }

    async fn update(&self, id: CardId, dto: UpdateCardDto) -> Result<Option<Card>, StoreError> {
        let mut tx = self.pool().begin().await?;

        let card = sqlx::query_as::<_, Card>(&format!(
            r#"UPDATE cards
               SET question = COALESCE($2, question),
                   answer = COALESCE($3, answer),
                   category_id = COALESCE($4, category_id),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING {CARD_COLUMNS}"#
        ))
        .bind(id)
        .bind(&dto.question)
        .bind(&dto.answer)
        .bind(dto.category_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(mut card) = card else {
            return Ok(None);
        };
        if let Some(tag_ids) = &dto.tag_ids {
            replace_tags(&mut *tx, TagLink::Card, card.id.into_inner(), tag_ids).await?;
        }
        tx.commit().await?;

        self.attach_card_tags(std::slice::from_mut(&mut card)).await?;
        Ok(Some(card))
    }

    async fn delete(&self, id: CardId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM cards WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_owner(&self, owner: UserId) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*)
               FROM cards c
               JOIN decks d ON d.id = c.deck_id
               WHERE d.user_id = $1"#,
        )
        .bind(owner)
        .fetch_one(self.pool())
        .await?;

        Ok(count)
    }
}

impl PgStore {
    async fn attach_card_tags(&self, cards: &mut [Card]) -> Result<(), StoreError> {
        let ids: Vec<_> = cards.iter().map(|card| card.id.into_inner()).collect();
        let mut tags = load_tags(self.pool(), TagLink::Card, &ids).await?;
        for card in cards {
            card.tags = tags.remove(&card.id.into_inner()).unwrap_or_default();
        }
        Ok(())
    }
}
