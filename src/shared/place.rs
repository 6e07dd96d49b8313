//! Place Data Structures
//!
//! A place is a geotagged record owned by exactly one user. These types are
//! what clients receive, so they carry no server-only data.

use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Coordinate pair resolved from a free-text address
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A place record
///
/// `creator` is the id of the owning user. The owner's `places` list always
/// holds this place's id while the place exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Unique place ID (UUID), never changes
    pub id: Uuid,
    /// Short title shown in listings
    pub title: String,
    /// Free-form description
    pub description: String,
    /// Address as entered by the creator
    pub address: String,
    /// Coordinates resolved from `address`
    pub location: Location,
    /// Opaque reference to the stored image
    pub image: String,
    /// Owning user ID
    pub creator: Uuid,
}

/// File name an image reference points at
///
/// References differing only in their directory part name the same stored
/// file. `None` when the reference has no final component (e.g. `".."`).
pub fn image_file_name(reference: &str) -> Option<&str> {
    Path::new(reference).file_name().and_then(|name| name.to_str())
}

/// Attributes supplied when creating a place
///
/// The linker assigns the id and the creator.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDraft {
    pub title: String,
    pub description: String,
    pub address: String,
    pub location: Location,
    pub image: String,
}

impl PlaceDraft {
    /// Turn the draft into a place owned by `creator`
    pub fn into_place(self, id: Uuid, creator: Uuid) -> Place {
        Place {
            id,
            title: self.title,
            description: self.description,
            address: self.address,
            location: self.location,
            image: self.image,
            creator,
        }
    }
}
