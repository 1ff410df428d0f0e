use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use flashdeck_core::{AppError, ErrorResponse};
use flashdeck_models::{
    CreateDeckDto, Deck, DeckId, DecksResponse, MessageResponse, PublicDeckDetail,
    PublicDecksResponse, UpdateDeckDto,
};
use tracing::instrument;

use super::service::DeckService;
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List the caller's decks
#[utoipa::path(
    get,
    path = "/api/decks",
    responses(
        (status = 200, description = "Decks owned by the caller", body = DecksResponse),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Decks"
)]
#[instrument(skip(state))]
pub async fn list_decks(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<DecksResponse>, AppError> {
    let decks = DeckService::list_own(&state, &identity).await?;
    Ok(Json(DecksResponse { decks }))
}

/// Create a deck
#[utoipa::path(
    post,
    path = "/api/decks",
    request_body = CreateDeckDto,
    responses(
        (status = 201, description = "Deck created", body = Deck),
        (status = 400, description = "Malformed body or unknown category", body = ErrorResponse),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Decks"
)]
#[instrument(skip(state, dto))]
pub async fn create_deck(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateDeckDto>,
) -> Result<(StatusCode, Json<Deck>), AppError> {
    let deck = DeckService::create(&state, &identity, dto).await?;
    Ok((StatusCode::CREATED, Json(deck)))
}

/// Get a deck by id
#[utoipa::path(
    get,
    path = "/api/decks/{id}",
    params(("id" = DeckId, Path, description = "Deck id")),
    responses(
        (status = 200, description = "Deck", body = Deck),
        (status = 403, description = "Deck is private and not owned by the caller", body = ErrorResponse),
        (status = 404, description = "Deck not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Decks"
)]
#[instrument(skip(state))]
pub async fn get_deck(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<DeckId>,
) -> Result<Json<Deck>, AppError> {
    let deck = DeckService::get(&state, Some(&identity), id).await?;
    Ok(Json(deck))
}

/// Update a deck
#[utoipa::path(
    put,
    path = "/api/decks/{id}",
    params(("id" = DeckId, Path, description = "Deck id")),
    request_body = UpdateDeckDto,
    responses(
        (status = 200, description = "Updated deck", body = Deck),
        (status = 403, description = "Caller does not own the deck", body = ErrorResponse),
        (status = 404, description = "Deck not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Decks"
)]
#[instrument(skip(state, dto))]
pub async fn update_deck(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<DeckId>,
    ValidatedJson(dto): ValidatedJson<UpdateDeckDto>,
) -> Result<Json<Deck>, AppError> {
    let deck = DeckService::update(&state, &identity, id, dto).await?;
    Ok(Json(deck))
}

/// Delete a deck and its cards
#[utoipa::path(
    delete,
    path = "/api/decks/{id}",
    params(("id" = DeckId, Path, description = "Deck id")),
    responses(
        (status = 200, description = "Deck deleted", body = MessageResponse),
        (status = 403, description = "Caller does not own the deck", body = ErrorResponse),
        (status = 404, description = "Deck not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Decks"
)]
#[instrument(skip(state))]
pub async fn delete_deck(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<DeckId>,
) -> Result<Json<MessageResponse>, AppError> {
    DeckService::delete(&state, &identity, id).await?;
    Ok(Json(MessageResponse::new("Deck deleted successfully")))
}

/// Browse public decks
#[utoipa::path(
    get,
    path = "/api/public/decks",
    responses(
        (status = 200, description = "Public decks with authors", body = PublicDecksResponse)
    ),
    tag = "Public"
)]
#[instrument(skip(state))]
pub async fn list_public_decks(
    State(state): State<AppState>,
) -> Result<Json<PublicDecksResponse>, AppError> {
    let decks = DeckService::list_public(&state).await?;
    Ok(Json(PublicDecksResponse { decks }))
}

/// Get a public deck with its cards
#[utoipa::path(
    get,
    path = "/api/public/decks/{id}",
    params(("id" = DeckId, Path, description = "Deck id")),
    responses(
        (status = 200, description = "Deck with cards", body = PublicDeckDetail),
        (status = 404, description = "Deck not found or not public", body = ErrorResponse)
    ),
    tag = "Public"
)]
#[instrument(skip(state))]
pub async fn get_public_deck(
    State(state): State<AppState>,
    OptionalAuthUser(caller): OptionalAuthUser,
    Path(id): Path<DeckId>,
) -> Result<Json<PublicDeckDetail>, AppError> {
    let detail = DeckService::get_public(&state, caller.as_ref(), id).await?;
    Ok(Json(detail))
}
