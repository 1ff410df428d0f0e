use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use flashdeck_auth::Role;
use flashdeck_core::{ErrorCode, ErrorPayload, ErrorResponse};
use flashdeck_models::{
    Card, CardsResponse, CategoriesResponse, Category, CreateCardDto, CreateDeckDto,
    CreateLabelDto, Deck, DeckAuthor, DeckBrief, DecksResponse, LoginRequest, LoginResponse,
    LogoutRequest, MessageResponse, OwnedCard, OwnedCardsResponse, ProfileResponse, PublicDeck,
    PublicDeckDetail, PublicDecksResponse, RefreshRequest, RegisterRequest, RegisterResponse, Tag,
    TagsResponse, TokenPair, UpdateCardDto, UpdateDeckDto, UpdateProfileDto, UserBrief, UserStats,
    UserSummary,
};

use crate::router::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::health,
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::refresh,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::logout_all,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::update_profile,
        crate::modules::decks::controller::list_decks,
        crate::modules::decks::controller::create_deck,
        crate::modules::decks::controller::get_deck,
        crate::modules::decks::controller::update_deck,
        crate::modules::decks::controller::delete_deck,
        crate::modules::decks::controller::list_public_decks,
        crate::modules::decks::controller::get_public_deck,
        crate::modules::cards::controller::list_own_cards,
        crate::modules::cards::controller::list_cards,
        crate::modules::cards::controller::create_card,
        crate::modules::cards::controller::get_card,
        crate::modules::cards::controller::update_card,
        crate::modules::cards::controller::delete_card,
        crate::modules::taxonomy::controller::list_categories,
        crate::modules::taxonomy::controller::create_category,
        crate::modules::taxonomy::controller::list_tags,
        crate::modules::taxonomy::controller::create_tag,
    ),
    components(
        schemas(
            Role,
            ErrorCode,
            ErrorPayload,
            ErrorResponse,
            HealthResponse,
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            LoginResponse,
            RefreshRequest,
            LogoutRequest,
            TokenPair,
            MessageResponse,
            UserBrief,
            UserSummary,
            UserStats,
            ProfileResponse,
            UpdateProfileDto,
            Deck,
            CreateDeckDto,
            UpdateDeckDto,
            DecksResponse,
            DeckAuthor,
            DeckBrief,
            PublicDeck,
            PublicDecksResponse,
            PublicDeckDetail,
            Card,
            CreateCardDto,
            UpdateCardDto,
            CardsResponse,
            OwnedCard,
            OwnedCardsResponse,
            Category,
            Tag,
            CreateLabelDto,
            CategoriesResponse,
            TagsResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Authentication", description = "Registration, login and token rotation"),
        (name = "Users", description = "The caller's own profile"),
        (name = "Decks", description = "Deck management and public browsing"),
        (name = "Cards", description = "Cards within decks"),
        (name = "Taxonomy", description = "Shared categories and tags")
    ),
    info(
        title = "Flashdeck API",
        version = "0.1.0",
        description = "Flashcard service with JWT access tokens and rotating refresh tokens.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route_group() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/auth/register",
            "/api/auth/refresh",
            "/api/decks/{id}",
            "/api/decks/{id}/cards",
            "/api/cards",
            "/api/cards/{id}",
            "/api/public/decks",
            "/api/public/decks/{id}",
            "/api/categories",
            "/api/tags",
            "/api/health",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {expected}"
            );
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
