//! Shared Error Types
//!
//! Errors raised while checking client input. They are shared between the
//! backend and any client that wants to validate a payload before sending it,
//! so they carry no server detail.
//!
//! # Usage
//!
//! ```rust
//! use yourplaces::shared::error::SharedError;
//!
//! let error = SharedError::validation("title", "Title must not be empty");
//! assert_eq!(error.field(), "title");
//! ```
use thiserror::Error;

/// Input errors shared by clients and the backend
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// A field failed validation
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The offending field
    pub fn field(&self) -> &str {
        match self {
            Self::ValidationError { field, .. } => field,
        }
    }
}
