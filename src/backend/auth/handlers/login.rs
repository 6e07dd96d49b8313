/**
 * Login Handler
 *
 * `POST /api/users/login`
 *
 * An unknown email and a wrong password produce the same 401 response, so
 * the endpoint cannot be used to probe which emails are registered.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::users::normalize_email;
use crate::backend::error::{AuthFailure, BackendError, BackendResult};
use crate::backend::middleware::AuthenticatedUser;
use crate::backend::server::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> BackendResult<Json<AuthResponse>> {
    let email = normalize_email(&request.email);

    let Some(user) = state.store.user_by_email(&email).await? else {
        tracing::warn!("Login attempt for unknown email");
        return Err(BackendError::auth(AuthFailure::InvalidCredentials));
    };

    if !state.credentials.verify(&request.password, &user.password_hash).await? {
        tracing::warn!("Invalid password for user: {}", user.id);
        return Err(BackendError::auth(AuthFailure::InvalidCredentials));
    }

    let token = state.tokens.issue(&AuthenticatedUser {
        user_id: user.id,
        email: user.email.clone(),
    })?;

    tracing::info!("User logged in: {}", user.id);

    Ok(Json(AuthResponse {
        user_id: user.id,
        email: user.email,
        token,
    }))
}
