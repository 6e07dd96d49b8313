/**
 * Place Handler Types
 *
 * Request and response bodies for the place endpoints, plus input
 * validation. Validation failures become `ValidationError` (422).
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::error::{BackendError, BackendResult};
use crate::shared::{Place, SharedError};

/// Minimum description length, in characters
pub const MIN_DESCRIPTION_LEN: usize = 5;

/// Create place request
///
/// `image` is the reference returned by the upload step.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CreatePlaceRequest {
    pub title: String,
    pub description: String,
    pub address: String,
    pub image: String,
}

impl CreatePlaceRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_details(&self.title, &self.description)?;
        if self.address.trim().is_empty() {
            return Err(SharedError::validation("address", "Address must not be empty."));
        }
        if self.image.trim().is_empty() {
            return Err(SharedError::validation("image", "An image is required."));
        }
        Ok(())
    }
}

/// Update place request; only title and description are editable
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct UpdatePlaceRequest {
    pub title: String,
    pub description: String,
}

impl UpdatePlaceRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_details(&self.title, &self.description)
    }
}

fn validate_details(title: &str, description: &str) -> Result<(), SharedError> {
    if title.trim().is_empty() {
        return Err(SharedError::validation("title", "Title must not be empty."));
    }
    if description.trim().chars().count() < MIN_DESCRIPTION_LEN {
        return Err(SharedError::validation(
            "description",
            format!("Description must be at least {MIN_DESCRIPTION_LEN} characters."),
        ));
    }
    Ok(())
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PlaceResponse {
    pub place: Place,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PlacesResponse {
    pub places: Vec<Place>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

/// Parse a path id; anything that is not a UUID names no entity
pub(crate) fn parse_id(raw: &str, not_found: &str) -> BackendResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| {
        tracing::debug!("Malformed id in path: {:?}", raw);
        BackendError::not_found(not_found)
    })
}
