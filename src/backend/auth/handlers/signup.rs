/**
 * Signup Handler
 *
 * `POST /api/users/signup`
 *
 * # Registration Process
 *
 * 1. Validate name, email and password
 * 2. Reject an email that is already registered (422)
 * 3. Hash the password
 * 4. Store the user with an empty `places` list
 * 5. Return `{userId, email, token}` with status 201
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest};
use crate::backend::auth::users::{normalize_email, User};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::AuthenticatedUser;
use crate::backend::server::state::AppState;
use crate::backend::store::StoreError;

const USER_EXISTS: &str = "Could not create user, email already exists.";

pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> BackendResult<(StatusCode, Json<AuthResponse>)> {
    request.validate()?;
    let email = normalize_email(&request.email);
    tracing::info!("Signup request for email: {}", email);

    if state.store.user_by_email(&email).await?.is_some() {
        tracing::warn!("Email already exists: {}", email);
        return Err(BackendError::validation(USER_EXISTS));
    }

    let password_hash = state.credentials.hash(&request.password).await?;
    let user = User::new(request.name.trim(), email, password_hash);

    match state.store.insert_user(user.clone()).await {
        Ok(()) => {}
        Err(StoreError::Duplicate { .. }) => {
            tracing::warn!("Email registered concurrently: {}", user.email);
            return Err(BackendError::validation(USER_EXISTS));
        }
        Err(err) => return Err(err.into()),
    }

    let token = state.tokens.issue(&AuthenticatedUser {
        user_id: user.id,
        email: user.email.clone(),
    })?;

    tracing::info!("User created successfully: {} ({})", user.name, user.email);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user_id: user.id,
            email: user.email,
            token,
        }),
    ))
}
