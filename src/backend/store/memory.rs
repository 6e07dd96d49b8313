//! In-process [`PlaceStore`] backed by a single `RwLock`.
//!
//! Every two-collection write runs under the write lock inside a
//! [`UnitOfWork`]. The unit records an undo entry for each step and replays
//! them on drop unless it was committed, so a failure between the place
//! write and the owner write leaves both collections as they were.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::auth::users::User;
use crate::backend::store::{LinkOutcome, PlaceStore, StoreError, StoreFuture, UnlinkOutcome};
use crate::shared::Place;

/// Individual writes inside an atomic unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteStep {
    InsertPlace,
    LinkOwner,
    RemovePlace,
    UnlinkOwner,
}

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    user_order: Vec<Uuid>,
    emails: HashMap<String, Uuid>,
    places: HashMap<Uuid, Place>,
}

enum Undo {
    DropPlace(Uuid),
    RestorePlace(Place),
    RestoreOwnerPlaces { owner: Uuid, places: Vec<Uuid> },
}

/// Undo log over a write-locked [`Tables`].
struct UnitOfWork<'a> {
    tables: &'a mut Tables,
    undo: Vec<Undo>,
    committed: bool,
}

impl<'a> UnitOfWork<'a> {
    fn begin(tables: &'a mut Tables) -> Self {
        Self { tables, undo: Vec::new(), committed: false }
    }

    fn insert_place(&mut self, place: Place) {
        self.undo.push(Undo::DropPlace(place.id));
        self.tables.places.insert(place.id, place);
    }

    fn remove_place(&mut self, id: Uuid) -> Option<Place> {
        let place = self.tables.places.remove(&id)?;
        self.undo.push(Undo::RestorePlace(place.clone()));
        Some(place)
    }

    fn edit_owner_places(&mut self, owner: Uuid, edit: impl FnOnce(&mut Vec<Uuid>)) -> Result<(), StoreError> {
        let user = self
            .tables
            .users
            .get_mut(&owner)
            .ok_or_else(|| StoreError::conflict(format!("owner {owner} vanished mid-unit")))?;
        self.undo.push(Undo::RestoreOwnerPlaces { owner, places: user.places.clone() });
        edit(&mut user.places);
        Ok(())
    }

    fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for UnitOfWork<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        while let Some(entry) = self.undo.pop() {
            match entry {
                Undo::DropPlace(id) => {
                    self.tables.places.remove(&id);
                }
                Undo::RestorePlace(place) => {
                    self.tables.places.insert(place.id, place);
                }
                Undo::RestoreOwnerPlaces { owner, places } => {
                    if let Some(user) = self.tables.users.get_mut(&owner) {
                        user.places = places;
                    }
                }
            }
        }
    }
}

/// Thread-safe in-memory store for development and tests.
///
/// All tables sit behind one `RwLock`, so writes to unrelated user/place
/// pairs still queue behind each other. Production deployments use
/// [`PgStore`](super::PgStore), whose row locks keep disjoint units apart.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Tables>>,
    #[cfg(test)]
    fault: Arc<std::sync::Mutex<Option<WriteStep>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies of both collections taken under one read lock.
    pub async fn snapshot(&self) -> (Vec<User>, Vec<Place>) {
        let tables = self.inner.read().await;
        let users = tables
            .user_order
            .iter()
            .filter_map(|id| tables.users.get(id).cloned())
            .collect();
        let places = tables.places.values().cloned().collect();
        (users, places)
    }

    /// Makes the next atomic unit fail right before `step`.
    #[cfg(test)]
    pub(crate) fn fail_before(&self, step: WriteStep) {
        if let Ok(mut fault) = self.fault.lock() {
            *fault = Some(step);
        }
    }

    #[cfg(test)]
    fn trip(&self, step: WriteStep) -> Result<(), StoreError> {
        let mut fault = self
            .fault
            .lock()
            .map_err(|_| StoreError::backend("fault switch poisoned"))?;
        if *fault == Some(step) {
            *fault = None;
            return Err(StoreError::conflict(format!("injected failure before {step:?}")));
        }
        Ok(())
    }

    #[cfg(not(test))]
    fn trip(&self, _step: WriteStep) -> Result<(), StoreError> {
        Ok(())
    }
}

impl PlaceStore for MemoryStore {
    fn insert_user(&self, user: User) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let mut tables = self.inner.write().await;
            if tables.emails.contains_key(&user.email) {
                return Err(StoreError::duplicate(format!("email {} already registered", user.email)));
            }
            tables.emails.insert(user.email.clone(), user.id);
            tables.user_order.push(user.id);
            tables.users.insert(user.id, user);
            Ok(())
        })
    }

    fn user_by_id(&self, id: Uuid) -> StoreFuture<'_, Option<User>> {
        Box::pin(async move { Ok(self.inner.read().await.users.get(&id).cloned()) })
    }

    fn user_by_email<'a>(&'a self, email: &'a str) -> StoreFuture<'a, Option<User>> {
        Box::pin(async move {
            let tables = self.inner.read().await;
            Ok(tables.emails.get(email).and_then(|id| tables.users.get(id)).cloned())
        })
    }

    fn list_users(&self) -> StoreFuture<'_, Vec<User>> {
        Box::pin(async move {
            let tables = self.inner.read().await;
            Ok(tables
                .user_order
                .iter()
                .filter_map(|id| tables.users.get(id).cloned())
                .collect())
        })
    }

    fn place_by_id(&self, id: Uuid) -> StoreFuture<'_, Option<Place>> {
        Box::pin(async move { Ok(self.inner.read().await.places.get(&id).cloned()) })
    }

    fn places_by_owner(&self, owner: Uuid) -> StoreFuture<'_, Option<Vec<Place>>> {
        Box::pin(async move {
            let tables = self.inner.read().await;
            Ok(tables.users.get(&owner).map(|user| {
                user.places
                    .iter()
                    .filter_map(|id| tables.places.get(id).cloned())
                    .collect()
            }))
        })
    }

    fn update_place_details<'a>(
        &'a self,
        id: Uuid,
        title: &'a str,
        description: &'a str,
    ) -> StoreFuture<'a, Option<Place>> {
        Box::pin(async move {
            let mut tables = self.inner.write().await;
            Ok(tables.places.get_mut(&id).map(|place| {
                place.title = title.to_owned();
                place.description = description.to_owned();
                place.clone()
            }))
        })
    }

    fn link_place(&self, place: Place) -> StoreFuture<'_, LinkOutcome> {
        Box::pin(async move {
            let mut tables = self.inner.write().await;
            if !tables.users.contains_key(&place.creator) {
                return Ok(LinkOutcome::OwnerMissing);
            }

            let mut unit = UnitOfWork::begin(&mut *tables);
            let (id, owner) = (place.id, place.creator);

            self.trip(WriteStep::InsertPlace)?;
            unit.insert_place(place);

            self.trip(WriteStep::LinkOwner)?;
            unit.edit_owner_places(owner, |places| places.push(id))?;

            unit.commit();
            Ok(LinkOutcome::Linked)
        })
    }

    fn unlink_place(&self, place_id: Uuid, owner: Uuid) -> StoreFuture<'_, UnlinkOutcome> {
        Box::pin(async move {
            let mut tables = self.inner.write().await;
            let image_in_use = match tables.places.get(&place_id) {
                None => return Ok(UnlinkOutcome::PlaceMissing),
                Some(place) if place.creator != owner => return Ok(UnlinkOutcome::OwnerMismatch),
                Some(place) => super::image_in_use(
                    &place.image,
                    tables
                        .places
                        .values()
                        .filter(|other| other.id != place_id)
                        .map(|other| other.image.as_str()),
                ),
            };

            let mut unit = UnitOfWork::begin(&mut *tables);

            self.trip(WriteStep::RemovePlace)?;
            let removed = unit
                .remove_place(place_id)
                .ok_or_else(|| StoreError::conflict(format!("place {place_id} vanished mid-unit")))?;

            self.trip(WriteStep::UnlinkOwner)?;
            unit.edit_owner_places(owner, |places| places.retain(|id| *id != place_id))?;

            unit.commit();
            Ok(UnlinkOutcome::Unlinked { place: removed, image_in_use })
        })
    }

    fn close(&self) -> StoreFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }
}
