/**
 * Session Tokens
 *
 * This module issues and verifies the signed identity tokens handed out at
 * signup and login. Tokens are HS256 JWTs carrying `{userId, email, iat,
 * exp}` and live for exactly one hour. There is no server-side session
 * state: verification only needs the signing key and the clock.
 */

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::error::{AuthFailure, BackendError, BackendResult};
use crate::backend::middleware::AuthenticatedUser;

/// Lifetime of every issued token, in seconds
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// User ID
    pub user_id: String,
    /// Email
    pub email: String,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Issues and verifies identity tokens
///
/// Cheap to clone; share one instance through the application state.
#[derive(Clone)]
pub struct TokenAuthenticator {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl fmt::Debug for TokenAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuthenticator")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenAuthenticator {
    /// Create an authenticator for the given signing secret
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller's clock in `verify_at`.
        validation.validate_exp = false;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl: Duration::seconds(TOKEN_TTL_SECS),
        }
    }

    /// Create a token for a user, valid for one hour from now
    pub fn issue(&self, user: &AuthenticatedUser) -> BackendResult<String> {
        self.issue_at(user, Utc::now())
    }

    /// Create a token as if issued at `now`
    ///
    /// The same key, user and instant always produce the same token.
    pub fn issue_at(&self, user: &AuthenticatedUser, now: DateTime<Utc>) -> BackendResult<String> {
        let iat = now.timestamp();
        let claims = Claims {
            user_id: user.user_id.to_string(),
            email: user.email.clone(),
            iat,
            exp: iat + self.ttl.num_seconds(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| {
            tracing::error!("Failed to create token: {:?}", e);
            BackendError::unknown("Could not issue a token, please try again later.")
        })
    }

    /// Verify a token against the current time
    pub fn verify(&self, token: &str) -> BackendResult<AuthenticatedUser> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token against the instant `now`
    ///
    /// Fails once `now` has reached the token's expiry.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> BackendResult<AuthenticatedUser> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| {
                tracing::warn!("Invalid token: {:?}", e);
                BackendError::auth(AuthFailure::InvalidToken)
            })?
            .claims;

        if now.timestamp() >= claims.exp {
            tracing::debug!("Token for {} expired at {}", claims.email, claims.exp);
            return Err(BackendError::auth(AuthFailure::ExpiredToken));
        }

        let user_id = Uuid::parse_str(&claims.user_id).map_err(|e| {
            tracing::warn!("Invalid user ID in token: {:?}", e);
            BackendError::auth(AuthFailure::InvalidToken)
        })?;

        Ok(AuthenticatedUser {
            user_id,
            email: claims.email,
        })
    }
}
