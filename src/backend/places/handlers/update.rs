//! `PATCH /api/places/{pid}` (authenticated, owner only).

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::backend::error::BackendResult;
use crate::backend::middleware::AuthUser;
use crate::backend::places::handlers::types::{parse_id, PlaceResponse, UpdatePlaceRequest};
use crate::backend::places::linker::OwnershipLinker;

/// Replace the title and description of a place
///
/// Address, location, image and creator never change after creation.
pub async fn update_place(
    State(linker): State<OwnershipLinker>,
    AuthUser(user): AuthUser,
    Path(pid): Path<String>,
    Json(request): Json<UpdatePlaceRequest>,
) -> BackendResult<Json<PlaceResponse>> {
    let id = parse_id(&pid, "Could not find a place for the provided id.")?;
    request.validate()?;

    let place = linker
        .edit_place(id, user.user_id, &request.title, &request.description)
        .await?;
    Ok(Json(PlaceResponse { place }))
}
