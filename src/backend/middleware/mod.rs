//! Middleware Module
//!
//! HTTP middleware that runs before the place handlers.
//!
//! - **`auth`** - Bearer-token verification for the mutating place routes

pub mod auth;

pub use auth::{auth_middleware, parse_bearer, AuthUser, AuthenticatedUser};
