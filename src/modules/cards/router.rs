use axum::{Router, routing::get};

use super::controller::{delete_card, get_card, list_own_cards, update_card};
use crate::state::AppState;

/// `/cards` routes. Per-deck listing and creation live under `/decks/{id}/cards`.
pub fn init_cards_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_own_cards))
        .route("/{id}", get(get_card).put(update_card).delete(delete_card))
}
