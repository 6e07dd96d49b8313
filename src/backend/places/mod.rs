//! Places Module
//!
//! Everything that creates, reads, edits or deletes places.
//!
//! - **`gate`** - `AuthorizationGate`: only the creator may mutate a place
//! - **`linker`** - `OwnershipLinker`: atomic place/owner writes
//! - **`geocode`** - Address to coordinates lookup
//! - **`images`** - Release of stored images on delete
//! - **`handlers`** - HTTP handlers for `/api/places`
//!
//! # Request Flow
//!
//! Mutating requests pass the auth middleware first, then the gate, then
//! the linker:
//!
//! ```text
//! Bearer token -> AuthenticatedUser -> AuthorizationGate -> OwnershipLinker -> PlaceStore
//! ```

pub mod gate;
pub mod linker;
pub mod geocode;
pub mod images;
pub mod handlers;

pub use gate::{AuthorizationGate, PlaceAction};
pub use geocode::{FixedGeocoder, GeocodeError, Geocoder, GoogleGeocoder};
pub use images::{DiskImageStore, ImageStore, NoopImageStore};
pub use linker::OwnershipLinker;
