//! `DELETE /api/places/{pid}` (authenticated, owner only).

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::backend::error::BackendResult;
use crate::backend::middleware::AuthUser;
use crate::backend::places::handlers::types::{parse_id, MessageResponse};
use crate::backend::places::linker::OwnershipLinker;

pub async fn delete_place(
    State(linker): State<OwnershipLinker>,
    AuthUser(user): AuthUser,
    Path(pid): Path<String>,
) -> BackendResult<Json<MessageResponse>> {
    let id = parse_id(&pid, "Could not find place to delete.")?;

    linker.delete_place(id, user.user_id).await?;
    Ok(Json(MessageResponse {
        message: "Place deleted.".to_string(),
    }))
}
