/**
 * Place Read Handlers
 *
 * Public lookups: `GET /api/places/{pid}` and `GET /api/places/user/{uid}`.
 * A malformed id is treated like an unknown one (404).
 */

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::places::handlers::types::{parse_id, PlaceResponse, PlacesResponse};
use crate::backend::store::PlaceStore;

const PLACE_NOT_FOUND: &str = "Could not find a place for the provided id.";
const PLACES_NOT_FOUND: &str = "Could not find places for the provided user id.";

/// Get a single place by id
pub async fn get_place_by_id(
    State(store): State<Arc<dyn PlaceStore>>,
    Path(pid): Path<String>,
) -> BackendResult<Json<PlaceResponse>> {
    let id = parse_id(&pid, PLACE_NOT_FOUND)?;

    let place = store
        .place_by_id(id)
        .await?
        .ok_or_else(|| BackendError::not_found(PLACE_NOT_FOUND))?;

    Ok(Json(PlaceResponse { place }))
}

/// Get every place created by a user
///
/// An unknown user and a user without places are both 404.
pub async fn get_places_by_user_id(
    State(store): State<Arc<dyn PlaceStore>>,
    Path(uid): Path<String>,
) -> BackendResult<Json<PlacesResponse>> {
    let id = parse_id(&uid, PLACES_NOT_FOUND)?;

    match store.places_by_owner(id).await? {
        Some(places) if !places.is_empty() => Ok(Json(PlacesResponse { places })),
        _ => Err(BackendError::not_found(PLACES_NOT_FOUND)),
    }
}
