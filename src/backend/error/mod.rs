//! Backend Error Module
//!
//! The error taxonomy shared by every backend component.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError, ErrorKind, AuthFailure
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Propagation
//!
//! Components return the most specific kind and propagate with `?`. Only the
//! HTTP boundary turns a `BackendError` into a status code and a sanitized
//! JSON body.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::{AuthFailure, BackendError, ErrorKind};

/// Result alias used across the backend
pub type BackendResult<T> = Result<T, BackendError>;
