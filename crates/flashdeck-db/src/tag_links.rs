//! `deck_tags` / `card_tags` join tables shared by the deck and card stores.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use flashdeck_models::{Tag, TagId};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::StoreError;

#[derive(Debug, Clone, Copy)]
pub(crate) enum TagLink {
    Deck,
    Card,
}

impl TagLink {
    fn table(self) -> &'static str {
        match self {
            TagLink::Deck => "deck_tags",
            TagLink::Card => "card_tags",
        }
    }

    fn column(self) -> &'static str {
        match self {
            TagLink::Deck => "deck_id",
            TagLink::Card => "card_id",
        }
    }
}

/// Drops repeated ids, keeping first-seen order.
pub(crate) fn distinct_tag_ids(ids: &[TagId]) -> Vec<TagId> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(id) {
            seen.push(*id);
        }
    }
    seen
}

/// Replaces the tag set of one deck or card. An unknown tag id trips the
/// foreign key and surfaces as [`StoreError::MissingReference`].
pub(crate) async fn replace_tags(
    conn: &mut PgConnection,
    link: TagLink,
    owner: Uuid,
    tag_ids: &[TagId],
) -> Result<(), StoreError> {
    let (table, column) = (link.table(), link.column());

    sqlx::query(&format!("DELETE FROM {table} WHERE {column} = $1"))
        .bind(owner)
        .execute(&mut *conn)
        .await?;

    let ids: Vec<Uuid> = distinct_tag_ids(tag_ids)
        .into_iter()
        .map(TagId::into_inner)
        .collect();
    if ids.is_empty() {
        return Ok(());
    }

    sqlx::query(&format!(
        "INSERT INTO {table} ({column}, tag_id) SELECT $1, UNNEST($2::uuid[])"
    ))
    .bind(owner)
    .bind(&ids)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Tags for each of `owners`, keyed by owner id and ordered by name.
pub(crate) async fn load_tags(
    pool: &PgPool,
    link: TagLink,
    owners: &[Uuid],
) -> Result<HashMap<Uuid, Vec<Tag>>, StoreError> {
    let mut by_owner: HashMap<Uuid, Vec<Tag>> = HashMap::new();
    if owners.is_empty() {
        return Ok(by_owner);
    }

    let (table, column) = (link.table(), link.column());
    let rows = sqlx::query_as::<_, (Uuid, TagId, String, DateTime<Utc>)>(&format!(
        r#"SELECT l.{column}, t.id, t.name, t.created_at
           FROM {table} l
           JOIN tags t ON t.id = l.tag_id
           WHERE l.{column} = ANY($1)
           ORDER BY t.name ASC"#
    ))
    .bind(owners)
    .fetch_all(pool)
    .await?;

    for (owner, id, name, created_at) in rows {
        by_owner.entry(owner).or_default().push(Tag {
            id,
            name,
            created_at,
        });
    }

    Ok(by_owner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_tag_ids_keeps_first_occurrence() {
        let (a, b) = (TagId::new(), TagId::new());
        assert_eq!(distinct_tag_ids(&[a, b, a, a]), vec![a, b]);
        assert!(distinct_tag_ids(&[]).is_empty());
    }
}
