//! # Flashdeck Models
//!
//! Entities and request/response DTOs shared by the stores and the HTTP layer.
//!
//! - [`ids`]: typed uuid identifiers
//! - [`users`], [`credentials`]: accounts and persisted refresh tokens
//! - [`auth`]: `/auth` bodies
//! - [`decks`], [`cards`]: owned resources
//! - [`taxonomy`]: categories and tags

pub mod auth;
pub mod cards;
pub mod credentials;
pub mod decks;
pub mod ids;
pub mod taxonomy;
pub mod users;

pub use auth::{
    LoginRequest, LoginResponse, LogoutRequest, MessageResponse, RefreshRequest, RegisterRequest,
    RegisterResponse, TokenPair,
};
pub use cards::{
    Card, CardsResponse, CreateCardDto, OwnedCard, OwnedCardsResponse, UpdateCardDto,
};
pub use credentials::RefreshCredential;
pub use decks::{
    CreateDeckDto, Deck, DeckBrief, DecksResponse, PublicDeck, PublicDeckDetail,
    PublicDecksResponse, UpdateDeckDto,
};
pub use ids::{CardId, CategoryId, CredentialId, DeckId, TagId, UserId};
pub use taxonomy::{CategoriesResponse, Category, CreateLabelDto, Tag, TagsResponse};
pub use users::{
    DeckAuthor, NewUser, ProfileResponse, UpdateProfileDto, User, UserBrief, UserStats,
    UserSummary,
};
