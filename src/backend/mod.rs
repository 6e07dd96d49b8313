//! Backend Module
//!
//! All server-side code: an Axum HTTP server for the places directory.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, startup
//! - **`routes`** - Route configuration and router assembly
//! - **`auth`** - Users, password credentials, identity tokens
//! - **`middleware`** - Bearer-token verification
//! - **`places`** - Authorization gate, ownership linker, geocoding, images
//! - **`store`** - `PlaceStore` contract with PostgreSQL and in-memory backends
//! - **`error`** - `BackendError` and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Config, state, initialization
//! ├── routes/         - Route configuration
//! ├── auth/           - Users, credentials, tokens, handlers
//! ├── middleware/     - Auth middleware and extractor
//! ├── places/         - Gate, linker, geocoder, images, handlers
//! ├── store/          - Storage contract and backends
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` carries the store as `Arc<dyn PlaceStore>` together with the
//! token authenticator, credential verifier, geocoder and ownership linker.
//! Handlers receive it through Axum's `State` extractor; there are no
//! globals.
//!
//! # Consistency
//!
//! A place and its creator's `places` list are always written together:
//! `OwnershipLinker` runs each create and delete as one atomic unit in the
//! store (a PostgreSQL transaction, or a locked undo log in memory).
//!
//! This module is only compiled when the `ssr` feature is enabled.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Places: authorization, ownership linking, adapters and handlers
pub mod places;

/// Storage contract and backends
pub mod store;

pub use error::BackendError;
pub use server::create_app;
