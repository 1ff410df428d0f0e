use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use flashdeck_core::{AppError, ErrorResponse};
use flashdeck_models::{
    Card, CardId, CardsResponse, CreateCardDto, DeckId, MessageResponse, OwnedCardsResponse,
    UpdateCardDto,
};
use tracing::instrument;

use super::service::CardService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List every card in the caller's decks
#[utoipa::path(
    get,
    path = "/api/cards",
    responses(
        (status = 200, description = "Caller's cards with their decks", body = OwnedCardsResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Cards"
)]
#[instrument(skip(state))]
pub async fn list_own_cards(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<OwnedCardsResponse>, AppError> {
    let cards = CardService::list_own(&state, &identity).await?;
    Ok(Json(OwnedCardsResponse { cards }))
}

/// List the cards of a deck
#[utoipa::path(
    get,
    path = "/api/decks/{id}/cards",
    params(("id" = DeckId, Path, description = "Deck id")),
    responses(
        (status = 200, description = "Cards of the deck", body = CardsResponse),
        (status = 403, description = "Deck is private and not owned by the caller", body = ErrorResponse),
        (status = 404, description = "Deck not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Cards"
)]
#[instrument(skip(state))]
pub async fn list_cards(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(deck_id): Path<DeckId>,
) -> Result<Json<CardsResponse>, AppError> {
    let cards = CardService::list_for_deck(&state, Some(&identity), deck_id).await?;
    Ok(Json(CardsResponse { cards }))
}

/// Add a card to a deck
#[utoipa::path(
    post,
    path = "/api/decks/{id}/cards",
    params(("id" = DeckId, Path, description = "Deck id")),
    request_body = CreateCardDto,
    responses(
        (status = 201, description = "Card created", body = Card),
        (status = 403, description = "Caller does not own the deck", body = ErrorResponse),
        (status = 404, description = "Deck not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Cards"
)]
#[instrument(skip(state, dto))]
pub async fn create_card(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(deck_id): Path<DeckId>,
    ValidatedJson(dto): ValidatedJson<CreateCardDto>,
) -> Result<(StatusCode, Json<Card>), AppError> {
    let card = CardService::create(&state, &identity, deck_id, dto).await?;
    Ok((StatusCode::CREATED, Json(card)))
}

/// Get a card by id
#[utoipa::path(
    get,
    path = "/api/cards/{id}",
    params(("id" = CardId, Path, description = "Card id")),
    responses(
        (status = 200, description = "Card", body = Card),
        (status = 403, description = "Parent deck is private and not owned by the caller", body = ErrorResponse),
        (status = 404, description = "Card not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Cards"
)]
#[instrument(skip(state))]
pub async fn get_card(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<CardId>,
) -> Result<Json<Card>, AppError> {
    let card = CardService::get(&state, Some(&identity), id).await?;
    Ok(Json(card))
}

/// Update a card
#[utoipa::path(
    put,
    path = "/api/cards/{id}",
    params(("id" = CardId, Path, description = "Card id")),
    request_body = UpdateCardDto,
    responses(
        (status = 200, description = "Updated card", body = Card),
        (status = 403, description = "Caller does not own the parent deck", body = ErrorResponse),
        (status = 404, description = "Card not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Cards"
)]
#[instrument(skip(state, dto))]
pub async fn update_card(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<CardId>,
    ValidatedJson(dto): ValidatedJson<UpdateCardDto>,
) -> Result<Json<Card>, AppError> {
    let card = CardService::update(&state, &identity, id, dto).await?;
    Ok(Json(card))
}

/// Delete a card
#[utoipa::path(
    delete,
    path = "/api/cards/{id}",
    params(("id" = CardId, Path, description = "Card id")),
    responses(
        (status = 200, description = "Card deleted", body = MessageResponse),
        (status = 403, description = "Caller does not own the parent deck", body = ErrorResponse),
        (status = 404, description = "Card not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Cards"
)]
#[instrument(skip(state))]
pub async fn delete_card(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<CardId>,
) -> Result<Json<MessageResponse>, AppError> {
    CardService::delete(&state, &identity, id).await?;
    Ok(Json(MessageResponse::new("Card deleted successfully")))
}
