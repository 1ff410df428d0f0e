pub mod auth;
pub mod cards;
pub mod decks;
pub mod taxonomy;
pub mod users;
