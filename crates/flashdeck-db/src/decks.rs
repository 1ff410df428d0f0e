use async_trait::async_trait;
use flashdeck_models::{CreateDeckDto, Deck, DeckId, UpdateDeckDto, UserId};

use crate::tag_links::{TagLink, load_tags, replace_tags};
use crate::{PgStore, StoreError};

const DECK_COLUMNS: &str =
    "id, user_id, title, description, category_id, is_public, created_at, updated_at";

/// Every returned [`Deck`] carries its tags. A `tag_ids` entry naming an
/// unknown tag fails the write with [`StoreError::MissingReference`].
#[async_trait]
pub trait DeckStore: Send + Sync {
    async fn create(&self, owner: UserId, dto: CreateDeckDto) -> Result<Deck, StoreError>;

    async fn get(&self, id: DeckId) -> Result<Option<Deck>, StoreError>;

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Deck>, StoreError>;

    async fn list_public(&self) -> Result<Vec<Deck>, StoreError>;

    async fn update(&self, id: DeckId, dto: UpdateDeckDto) -> Result<Option<Deck>, StoreError>;

    /// Removes the deck and its cards.
    async fn delete(&self, id: DeckId) -> Result<bool, StoreError>;

    async fn count_by_owner(&self, owner: UserId) -> Result<i64, StoreError>;
}

#[async_trait]
impl DeckStore for PgStore {
    async fn create(&self, owner: UserId, dto: CreateDeckDto) -> Result<Deck, StoreError> {
        let mut tx = self.pool().begin().await?;

        let mut deck = sqlx::query_as::<_, Deck>(&format!(
            r#"INSERT INTO decks (id, user_id, title, description, category_id, is_public)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {DECK_COLUMNS}"#
        ))
        .bind(DeckId::new())
        .bind(owner)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.category_id)
        .bind(dto.is_public)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(tag_ids) = &dto.tag_ids {
            replace_tags(&mut *tx, TagLink::Deck, deck.id.into_inner(), tag_ids).await?;
        }
        tx.commit().await?;

        self.attach_deck_tags(std::slice::from_mut(&mut deck)).await?;
        Ok(deck)
    }

    async fn get(&self, id: DeckId) -> Result<Option<Deck>, StoreError> {
        let mut deck = sqlx::query_as::<_, Deck>(&format!(
            "SELECT {DECK_COLUMNS} FROM decks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        if let Some(deck) = deck.as_mut() {
            self.attach_deck_tags(std::slice::from_mut(deck)).await?;
        }
        Ok(deck)
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Deck>, StoreError> {
        let mut decks = sqlx::query_as::<_, Deck>(&format!(
            "SELECT {DECK_COLUMNS} FROM decks WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner)
        .fetch_all(self.pool())
        .await?;

        self.attach_deck_tags(&mut decks).await?;
        Ok(decks)
    }

    async fn list_public(&self) -> Result<Vec<Deck>, StoreError> {
        let mut decks = sqlx::query_as::<_, Deck>(&format!(
            "SELECT {DECK_COLUMNS} FROM decks WHERE is_public = TRUE ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool())
        .await?;

        self.attach_deck_tags(&mut decks).await?;
        Ok(decks)
    }

    async fn update(&self, id: DeckId, dto: UpdateDeckDto) -> Result<Option<Deck>, StoreError> {
        let mut tx = self.pool().begin().await?;

        let deck = sqlx::query_as::<_, Deck>(&format!(
            r#"UPDATE decks
               SET title = COALESCE($2, title),
                   description = COALESCE($3, description),
                   category_id = COALESCE($4, category_id),
                   is_public = COALESCE($5, is_public),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING {DECK_COLUMNS}"#
        ))
        .bind(id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.category_id)
        .bind(dto.is_public)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(mut deck) = deck else {
            return Ok(None);
        };
        if let Some(tag_ids) = &dto.tag_ids {
            replace_tags(&mut *tx, TagLink::Deck, deck.id.into_inner(), tag_ids).await?;
        }
        tx.commit().await?;

        self.attach_deck_tags(std::slice::from_mut(&mut deck)).await?;
        Ok(Some(deck))
    }

    async fn delete(&self, id: DeckId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM decks WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_owner(&self, owner: UserId) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM decks WHERE user_id = $1")
            .bind(owner)
            .fetch_one(self.pool())
            .await?;

        Ok(count)
    }
}

impl PgStore {
    async fn attach_deck_tags(&self, decks: &mut [Deck]) -> Result<(), StoreError> {
        let ids: Vec<_> = decks.iter().map(|deck| deck.id.into_inner()).collect();
        let mut tags = load_tags(self.pool(), TagLink::Deck, &ids).await?;
        for deck in decks {
            deck.tags = tags.remove(&deck.id.into_inner()).unwrap_or_default();
        }
        Ok(())
    }
}
