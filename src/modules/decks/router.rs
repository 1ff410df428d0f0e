use axum::{Router, routing::get};

use super::controller::{
    create_deck, delete_deck, get_deck, get_public_deck, list_decks, list_public_decks,
    update_deck,
};
use crate::modules::cards::controller::{create_card, list_cards};
use crate::state::AppState;

pub fn init_decks_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_decks).post(create_deck))
        .route("/{id}", get(get_deck).put(update_deck).delete(delete_deck))
        .route("/{id}/cards", get(list_cards).post(create_card))
}

pub fn init_public_router() -> Router<AppState> {
    Router::new()
        .route("/decks", get(list_public_decks))
        .route("/decks/{id}", get(get_public_deck))
}
