//! Ownership and visibility rules for decks and cards.
//!
//! A resource is readable by anyone when it is public, and by its owner
//! otherwise. Only the owner may modify it. Roles play no part.

use thiserror::Error;
use uuid::Uuid;

use crate::identity::Identity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Write,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessDenied {
    #[error("you do not have access to this resource")]
    Forbidden,
    #[error("authentication required")]
    Unauthenticated,
}

pub fn authorize(
    caller: Option<&Identity>,
    owner_id: Uuid,
    is_public: bool,
    action: Action,
) -> Result<(), AccessDenied> {
    let is_owner = caller.is_some_and(|c| c.user_id == owner_id);

    match action {
        Action::Read if is_public || is_owner => Ok(()),
        Action::Write if is_owner => Ok(()),
        _ => Err(AccessDenied::Forbidden),
    }
}

/// Shared catalogue entries (categories, tags): anyone reads, any
/// authenticated caller writes.
pub fn authorize_shared(caller: Option<&Identity>, action: Action) -> Result<(), AccessDenied> {
    match (action, caller) {
        (Action::Read, _) | (Action::Write, Some(_)) => Ok(()),
        (Action::Write, None) => Err(AccessDenied::Unauthenticated),
    }
}
