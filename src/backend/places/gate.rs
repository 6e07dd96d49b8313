//! Owner-only mutation check for places.

use uuid::Uuid;

use crate::backend::error::{BackendError, BackendResult};
use crate::shared::Place;

/// Mutations guarded by the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceAction {
    Edit,
    Delete,
}

impl PlaceAction {
    fn verb(self) -> &'static str {
        match self {
            PlaceAction::Edit => "edit",
            PlaceAction::Delete => "delete",
        }
    }
}

/// Decides whether an authenticated user may mutate a place.
///
/// Only the creator may edit or delete a place.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationGate;

impl AuthorizationGate {
    pub fn can_edit(user_id: Uuid, place: &Place) -> bool {
        place.creator == user_id
    }

    /// Fails with `AuthorizationError` unless `user_id` created `place`.
    pub fn authorize(user_id: Uuid, place: &Place, action: PlaceAction) -> BackendResult<()> {
        if Self::can_edit(user_id, place) {
            return Ok(());
        }
        tracing::warn!(
            "User {} tried to {} place {} owned by {}",
            user_id,
            action.verb(),
            place.id,
            place.creator
        );
        Err(Self::denied(action))
    }

    pub(crate) fn denied(action: PlaceAction) -> BackendError {
        BackendError::authorization(format!("You are not allowed to {} this place.", action.verb()))
    }
}
