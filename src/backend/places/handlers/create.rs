/**
 * Create Place Handler
 *
 * `POST /api/places` (authenticated). The creator is always the
 * authenticated user, never a field of the request body.
 *
 * # Process
 *
 * 1. Validate title, description, address and image
 * 2. Resolve the address to coordinates
 * 3. Insert the place and link it to the creator in one atomic unit
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::error::BackendResult;
use crate::backend::middleware::AuthUser;
use crate::backend::places::handlers::types::{CreatePlaceRequest, PlaceResponse};
use crate::backend::server::state::AppState;
use crate::shared::PlaceDraft;

pub async fn create_place(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreatePlaceRequest>,
) -> BackendResult<(StatusCode, Json<PlaceResponse>)> {
    request.validate()?;

    let location = state.geocoder.locate(&request.address).await?;
    let draft = PlaceDraft {
        title: request.title,
        description: request.description,
        address: request.address,
        location,
        image: request.image,
    };

    let place = state.linker.create_place(user.user_id, draft).await?;
    Ok((StatusCode::CREATED, Json(PlaceResponse { place })))
}
