/**
 * Backend Error Types
 *
 * This module defines the single error type every backend component returns.
 * Each variant is one error kind; the message it carries is already safe to
 * show to a client. Internal detail (database errors, hashing failures) is
 * logged where it happens and never stored here.
 *
 * # Error Kinds
 *
 * - `AuthError` - the caller is not authenticated (401)
 * - `AuthorizationError` - authenticated but not allowed (401)
 * - `NotFoundError` - the target does not exist (404)
 * - `ValidationError` - invalid input (422)
 * - `TransactionError` - an atomic write unit failed and was rolled back (500)
 * - `HashingError` - the password hashing primitive failed (500)
 * - `UnknownError` - anything else (500)
 */

use thiserror::Error;
use axum::http::StatusCode;
use serde::Serialize;
use crate::shared::SharedError;

/// Discriminant of a [`BackendError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    AuthError,
    AuthorizationError,
    NotFoundError,
    ValidationError,
    TransactionError,
    HashingError,
    UnknownError,
}

/// Why authentication failed
///
/// All reasons map to the same response; the reason is kept for logs and
/// tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// No `Authorization` header at all
    MissingCredential,
    /// Header present but not `Bearer <token>`
    MalformedCredential,
    /// Token failed decoding or signature checks
    InvalidToken,
    /// Token signature is fine but its expiry has passed
    ExpiredToken,
    /// Login with an unknown email or a wrong password
    InvalidCredentials,
}

/// Backend error
///
/// # Usage
///
/// ```rust
/// use yourplaces::backend::error::{BackendError, ErrorKind};
///
/// let err = BackendError::not_found("Could not find a place for the provided id.");
/// assert_eq!(err.kind(), ErrorKind::NotFoundError);
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The request carries no valid identity
    #[error("Authentication failed ({reason:?}): {message}")]
    AuthError {
        /// Internal reason, never shown to the client
        reason: AuthFailure,
        /// Human-readable error message
        message: String,
    },

    /// The caller is authenticated but may not perform the action
    #[error("Not allowed: {message}")]
    AuthorizationError {
        /// Human-readable error message
        message: String,
    },

    /// The target entity does not exist
    #[error("Not found: {message}")]
    NotFoundError {
        /// Human-readable error message
        message: String,
    },

    /// Client input was rejected
    #[error("Invalid input: {message}")]
    ValidationError {
        /// Human-readable error message
        message: String,
    },

    /// An atomic write unit failed and was rolled back
    #[error("Transaction failed: {message}")]
    TransactionError {
        /// Human-readable error message
        message: String,
    },

    /// The password hashing primitive failed
    #[error("Hashing failed: {message}")]
    HashingError {
        /// Human-readable error message
        message: String,
    },

    /// Any other failure
    #[error("Unknown error: {message}")]
    UnknownError {
        /// Human-readable error message
        message: String,
    },
}

impl BackendError {
    /// Create an authentication error for the given reason
    pub fn auth(reason: AuthFailure) -> Self {
        let message = match reason {
            AuthFailure::InvalidCredentials => "Invalid credentials, could not log you in.",
            _ => "Authentication failed.",
        };
        Self::AuthError {
            reason,
            message: message.to_string(),
        }
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::AuthorizationError {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFoundError {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn transaction(message: impl Into<String>) -> Self {
        Self::TransactionError {
            message: message.into(),
        }
    }

    pub fn hashing(message: impl Into<String>) -> Self {
        Self::HashingError {
            message: message.into(),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::UnknownError {
            message: message.into(),
        }
    }

    /// The kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AuthError { .. } => ErrorKind::AuthError,
            Self::AuthorizationError { .. } => ErrorKind::AuthorizationError,
            Self::NotFoundError { .. } => ErrorKind::NotFoundError,
            Self::ValidationError { .. } => ErrorKind::ValidationError,
            Self::TransactionError { .. } => ErrorKind::TransactionError,
            Self::HashingError { .. } => ErrorKind::HashingError,
            Self::UnknownError { .. } => ErrorKind::UnknownError,
        }
    }

    /// Internal reason of an authentication error
    pub fn auth_failure(&self) -> Option<AuthFailure> {
        match self {
            Self::AuthError { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `AuthError`, `AuthorizationError` - 401 Unauthorized
    /// - `NotFoundError` - 404 Not Found
    /// - `ValidationError` - 422 Unprocessable Entity
    /// - `TransactionError`, `HashingError`, `UnknownError` - 500
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::AuthError | ErrorKind::AuthorizationError => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFoundError => StatusCode::NOT_FOUND,
            ErrorKind::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::TransactionError | ErrorKind::HashingError | ErrorKind::UnknownError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The client-facing message
    pub fn message(&self) -> &str {
        match self {
            Self::AuthError { message, .. }
            | Self::AuthorizationError { message }
            | Self::NotFoundError { message }
            | Self::ValidationError { message }
            | Self::TransactionError { message }
            | Self::HashingError { message }
            | Self::UnknownError { message } => message,
        }
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { message, .. } => Self::validation(message),
        }
    }
}
