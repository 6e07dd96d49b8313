/**
 * Ownership Linker
 *
 * Owns every write that touches both a place and its creator. Creating and
 * deleting a place each run as one atomic unit in the store, so the
 * `place.creator` / `user.places` pair is never observable half-written.
 *
 * # Failure Handling
 *
 * A unit that fails is rolled back by the store and reported as
 * `TransactionError`. There is no retry; the caller may simply try again.
 * Image release after a delete is best-effort and only logged.
 */

use std::sync::Arc;

use uuid::Uuid;

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::places::gate::{AuthorizationGate, PlaceAction};
use crate::backend::places::images::ImageStore;
use crate::backend::store::{LinkOutcome, PlaceStore, StoreError, UnlinkOutcome};
use crate::shared::{Place, PlaceDraft};

/// Performs the atomic user/place writes
#[derive(Clone)]
pub struct OwnershipLinker {
    store: Arc<dyn PlaceStore>,
    images: Arc<dyn ImageStore>,
}

fn unit_failed(action: &str, err: StoreError) -> BackendError {
    tracing::error!("{} failed and was rolled back: {:?}", action, err);
    BackendError::transaction(format!("{action} failed, please try again later."))
}

fn place_not_found() -> BackendError {
    BackendError::not_found("Could not find a place for the provided id.")
}

impl OwnershipLinker {
    pub fn new(store: Arc<dyn PlaceStore>, images: Arc<dyn ImageStore>) -> Self {
        Self { store, images }
    }

    /// Create a place owned by `owner` and link it to the owner
    ///
    /// Fails with `NotFoundError` if the owner does not exist; the check runs
    /// inside the same unit as the writes.
    pub async fn create_place(&self, owner: Uuid, draft: PlaceDraft) -> BackendResult<Place> {
        let place = draft.into_place(Uuid::new_v4(), owner);

        match self.store.link_place(place.clone()).await {
            Ok(LinkOutcome::Linked) => {
                tracing::info!("Place {} created by {}", place.id, owner);
                Ok(place)
            }
            Ok(LinkOutcome::OwnerMissing) => {
                tracing::warn!("Place creation for unknown user {}", owner);
                Err(BackendError::not_found("Could not find user for the provided id."))
            }
            Err(err) => Err(unit_failed("Creating place", err)),
        }
    }

    /// Replace title and description of a place the requester owns
    pub async fn edit_place(
        &self,
        place_id: Uuid,
        requester: Uuid,
        title: &str,
        description: &str,
    ) -> BackendResult<Place> {
        let place = self.store.place_by_id(place_id).await?.ok_or_else(place_not_found)?;
        AuthorizationGate::authorize(requester, &place, PlaceAction::Edit)?;

        let updated = self
            .store
            .update_place_details(place_id, title, description)
            .await?
            .ok_or_else(place_not_found)?;

        tracing::info!("Place {} updated by {}", place_id, requester);
        Ok(updated)
    }

    /// Delete a place the requester owns and unlink it from its creator
    ///
    /// Returns the removed place. Existence and ownership are checked up
    /// front and again inside the unit, so a concurrent delete of the same
    /// place fails cleanly with `NotFoundError`. The image is kept while
    /// any other place still references the same file.
    pub async fn delete_place(&self, place_id: Uuid, requester: Uuid) -> BackendResult<Place> {
        let not_found = || BackendError::not_found("Could not find place to delete.");

        let place = self.store.place_by_id(place_id).await?.ok_or_else(not_found)?;
        AuthorizationGate::authorize(requester, &place, PlaceAction::Delete)?;

        let (removed, image_in_use) = match self.store.unlink_place(place_id, requester).await {
            Ok(UnlinkOutcome::Unlinked { place, image_in_use }) => (place, image_in_use),
            Ok(UnlinkOutcome::PlaceMissing) => return Err(not_found()),
            Ok(UnlinkOutcome::OwnerMismatch) => return Err(AuthorizationGate::denied(PlaceAction::Delete)),
            Err(err) => return Err(unit_failed("Deleting place", err)),
        };
        tracing::info!("Place {} deleted by {}", place_id, requester);

        if image_in_use {
            tracing::debug!("Keeping image {}; another place still references it", removed.image);
        } else if let Err(err) = self.images.release(&removed.image).await {
            tracing::warn!("Could not release image {} of place {}: {:?}", removed.image, place_id, err);
        }

        Ok(removed)
    }
}
