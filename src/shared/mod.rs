//! Shared Module
//!
//! Types shared between the backend and its clients. Everything here is
//! plain data designed for serialization over the JSON API; server-only
//! records (such as users with their password hashes) live in `backend`.

/// Place and location types
pub mod place;

/// Shared error types
pub mod error;

pub use place::{image_file_name, Location, Place, PlaceDraft};
pub use error::SharedError;
