//! Request gate extractors.
//!
//! Handlers declare the caller they need as an argument:
//!
//! ```ignore
//! async fn get_deck(AuthUser(identity): AuthUser) -> ... { }          // bearer required
//! async fn browse(OptionalAuthUser(caller): OptionalAuthUser) -> ... { } // bearer optional
//! ```

pub mod auth;
