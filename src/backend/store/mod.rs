//! Storage contract for users and places, plus the built-in stores.
//!
//! Users and places live in two collections. The only writes that touch
//! both are [`PlaceStore::link_place`] and [`PlaceStore::unlink_place`]; each
//! is a single atomic unit: either both sides are written or neither is, and
//! no reader ever sees one side without the other.
//!
//! - [`MemoryStore`] keeps everything in-process (development and tests).
//! - [`PgStore`] uses PostgreSQL transactions.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use thiserror::Error;
use uuid::Uuid;

use crate::backend::auth::users::User;
use crate::backend::error::BackendError;
use crate::shared::{image_file_name, Place};

/// Future returned by [`PlaceStore`] methods
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Storage backend contract
pub trait PlaceStore
where
    Self: Send + Sync,
{
    /// Inserts a new user; fails with [`StoreError::Duplicate`] if the email is taken.
    fn insert_user(&self, user: User) -> StoreFuture<'_, ()>;

    fn user_by_id(&self, id: Uuid) -> StoreFuture<'_, Option<User>>;

    fn user_by_email<'a>(&'a self, email: &'a str) -> StoreFuture<'a, Option<User>>;

    /// All users, oldest first.
    fn list_users(&self) -> StoreFuture<'_, Vec<User>>;

    fn place_by_id(&self, id: Uuid) -> StoreFuture<'_, Option<Place>>;

    /// Places owned by a user, in the order of the user's `places` list.
    ///
    /// `None` when the user does not exist.
    fn places_by_owner(&self, owner: Uuid) -> StoreFuture<'_, Option<Vec<Place>>>;

    /// Replaces title and description; `None` when the place does not exist.
    fn update_place_details<'a>(
        &'a self,
        id: Uuid,
        title: &'a str,
        description: &'a str,
    ) -> StoreFuture<'a, Option<Place>>;

    /// Atomically inserts `place` and appends its id to its creator's `places`.
    fn link_place(&self, place: Place) -> StoreFuture<'_, LinkOutcome>;

    /// Atomically removes a place and pulls its id from the owner's `places`.
    ///
    /// The existence and ownership checks run inside the same unit.
    fn unlink_place(&self, place_id: Uuid, owner: Uuid) -> StoreFuture<'_, UnlinkOutcome>;

    /// Releases backend resources at shutdown.
    fn close(&self) -> StoreFuture<'_, ()>;
}

/// Result of [`PlaceStore::link_place`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Both writes are committed.
    Linked,
    /// The creator does not exist; nothing was written.
    OwnerMissing,
}

/// Result of [`PlaceStore::unlink_place`]
#[derive(Clone, Debug, PartialEq)]
pub enum UnlinkOutcome {
    /// Both writes are committed; carries the removed place.
    ///
    /// `image_in_use` is set when another place still references the same
    /// image file, which must then be kept.
    Unlinked { place: Place, image_in_use: bool },
    /// No such place; nothing was written.
    PlaceMissing,
    /// The place belongs to someone else; nothing was written.
    OwnerMismatch,
}

/// Whether any of `others` names the same image file as `image`
pub(crate) fn image_in_use<'a>(image: &str, others: impl IntoIterator<Item = &'a str>) -> bool {
    match image_file_name(image) {
        Some(name) => others.into_iter().any(|other| image_file_name(other) == Some(name)),
        None => false,
    }
}

/// Error type produced by [`PlaceStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated.
    #[error("Duplicate record: {message}.")]
    Duplicate {
        /// Human-readable error payload.
        message: String,
    },
    /// A concurrent writer or a failed step aborted an atomic unit.
    #[error("Write conflict: {message}.")]
    Conflict {
        /// Human-readable error payload.
        message: String,
    },
    /// Backend-level failure for the storage engine.
    #[error("Backend failure: {message}.")]
    Backend {
        /// Human-readable error payload.
        message: String,
    },
}

impl StoreError {
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate { message: message.into() }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict { message: message.into() }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend { message: message.into() }
    }
}

/// Lookup-path mapping; atomic units map their own failures.
impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Store operation failed: {:?}", err);
        match err {
            StoreError::Duplicate { .. } => BackendError::validation("Record already exists."),
            StoreError::Conflict { .. } => {
                BackendError::transaction("The request conflicted with another update, please try again.")
            }
            StoreError::Backend { .. } => BackendError::unknown("Something went wrong, please try again later."),
        }
    }
}

/// Lists every broken back-reference between `users` and `places`.
///
/// An empty result means every place's creator lists it exactly once and
/// every listed id resolves to a place created by that user.
pub fn ownership_violations(users: &[User], places: &[Place]) -> Vec<String> {
    let users_by_id: HashMap<Uuid, &User> = users.iter().map(|u| (u.id, u)).collect();
    let places_by_id: HashMap<Uuid, &Place> = places.iter().map(|p| (p.id, p)).collect();
    let mut violations = Vec::new();

    for place in places {
        match users_by_id.get(&place.creator) {
            None => violations.push(format!("place {} has unknown creator {}", place.id, place.creator)),
            Some(owner) => {
                let listed = owner.places.iter().filter(|id| **id == place.id).count();
                if listed != 1 {
                    violations.push(format!(
                        "place {} listed {} times by its creator {}",
                        place.id, listed, owner.id
                    ));
                }
            }
        }
    }

    for user in users {
        for place_id in &user.places {
            match places_by_id.get(place_id) {
                None => violations.push(format!("user {} lists missing place {}", user.id, place_id)),
                Some(place) if place.creator != user.id => violations.push(format!(
                    "user {} lists place {} created by {}",
                    user.id, place_id, place.creator
                )),
                Some(_) => {}
            }
        }
    }

    violations
}
