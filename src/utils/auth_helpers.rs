use flashdeck_auth::{AccessDenied, Action, Identity, authorize, authorize_shared};
use flashdeck_core::AppError;
use flashdeck_models::Deck;

use crate::metrics::track_authorization;

fn denied(err: AccessDenied) -> AppError {
    match err {
        AccessDenied::Forbidden => AppError::forbidden("You do not have access to this deck"),
        AccessDenied::Unauthenticated => AppError::unauthorized("Authentication required"),
    }
}

/// Checks `action` on a deck, or on a card through its parent deck.
pub fn require_deck_access(
    caller: Option<&Identity>,
    deck: &Deck,
    action: Action,
) -> Result<(), AppError> {
    let decision = authorize(caller, deck.user_id.into_inner(), deck.is_public, action);
    track_authorization(action, decision.is_ok());

    if let Err(err) = decision {
        tracing::debug!(
            deck_id = %deck.id,
            caller = ?caller.map(|c| c.user_id),
            ?action,
            "Deck access denied"
        );
        return Err(denied(err));
    }
    Ok(())
}

/// Checks `action` on a category or tag.
pub fn require_shared_access(caller: Option<&Identity>, action: Action) -> Result<(), AppError> {
    let decision = authorize_shared(caller, action);
    track_authorization(action, decision.is_ok());
    decision.map_err(denied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use flashdeck_auth::Role;
    use flashdeck_core::ErrorCode;
    use flashdeck_models::{DeckId, UserId};

    fn deck(owner: UserId, is_public: bool) -> Deck {
        Deck {
            id: DeckId::new(),
            user_id: owner,
            title: "Verbs".to_string(),
            description: None,
            category_id: None,
            is_public,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_stranger_gets_forbidden() {
        let stranger = Identity {
            user_id: UserId::new().into_inner(),
            role: Role::Admin,
        };
        let err = require_deck_access(Some(&stranger), &deck(UserId::new(), false), Action::Read)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[test]
    fn test_owner_is_allowed() {
        let owner = UserId::new();
        let identity = Identity {
            user_id: owner.into_inner(),
            role: Role::User,
        };
        assert!(require_deck_access(Some(&identity), &deck(owner, false), Action::Write).is_ok());
    }

    #[test]
    fn test_anonymous_shared_write_is_unauthorized() {
        let err = require_shared_access(None, Action::Write).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }
}
