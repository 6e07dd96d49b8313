//! `GET /api/users`: public directory of users.

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{UserResponse, UsersResponse};
use crate::backend::error::BackendResult;
use crate::backend::store::PlaceStore;

pub async fn get_users(State(store): State<Arc<dyn PlaceStore>>) -> BackendResult<Json<UsersResponse>> {
    let users = store.list_users().await?;

    Ok(Json(UsersResponse {
        users: users.into_iter().map(UserResponse::from).collect(),
    }))
}
