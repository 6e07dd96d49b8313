/**
 * Authentication Middleware
 *
 * Guards the mutating place routes. The identity token travels in the
 * `Authorization` header as `Bearer <token>`; a verified token attaches an
 * [`AuthenticatedUser`] to the request extensions for the handlers.
 * CORS preflight (`OPTIONS`) requests pass through unverified.
 */

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::TokenAuthenticator;
use crate::backend::error::{AuthFailure, BackendError};

/// Authenticated user data extracted from the identity token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Pull the raw token out of an `Authorization` header value
///
/// The value must be exactly `Bearer <token>` with a non-empty token.
pub fn parse_bearer(header: Option<&HeaderValue>) -> Result<&str, AuthFailure> {
    let value = header.ok_or(AuthFailure::MissingCredential)?;
    let value = value.to_str().map_err(|_| AuthFailure::MalformedCredential)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthFailure::MalformedCredential),
    }
}

/// Authentication middleware
///
/// Returns 401 with a JSON body if the token is missing, malformed, forged
/// or expired. Nothing downstream runs in that case.
pub async fn auth_middleware(
    State(tokens): State<Arc<TokenAuthenticator>>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    if request.method() == Method::OPTIONS {
        return Ok(next.run(request).await);
    }

    let token = parse_bearer(request.headers().get(AUTHORIZATION)).map_err(|reason| {
        tracing::warn!("Rejected request to {}: {:?}", request.uri().path(), reason);
        BackendError::auth(reason)
    })?;

    let user = tokens.verify(token)?;
    tracing::debug!("Authenticated {} for {}", user.user_id, request.uri().path());

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Only usable behind [`auth_middleware`].
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::auth(AuthFailure::MissingCredential)
            })
    }
}
