//! YourPlaces - Main Library
//!
//! Backend for a places directory: users register and log in, then create,
//! edit and delete geotagged places they own.
//!
//! # Overview
//!
//! The interesting parts are:
//! - Stateless token authentication (HS256, one hour) at the HTTP boundary
//! - Owner-only edits and deletes
//! - Atomic creation and deletion of a place together with the creator's
//!   back-reference, so `place.creator` and `user.places` always agree
//!
//! # Module Structure
//!
//! - **`shared`** - Types clients also see
//!   - `Place`, `Location`, `PlaceDraft`
//!   - Input validation errors
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server, routes and middleware
//!   - Token authenticator, credential verifier, authorization gate
//!   - Ownership linker over the `PlaceStore` contract
//!   - PostgreSQL and in-memory stores
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - enables the backend module and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use yourplaces::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let (app, _state) = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `Result<T, E>` for fallible operations, never panics
//! - `shared::SharedError` for input validation
//! - `backend::error::BackendError` for everything surfaced over HTTP

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
