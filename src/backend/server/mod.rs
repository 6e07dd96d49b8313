//! Server Module
//!
//! Startup wiring for the HTTP server.
//!
//! - **`config`** - `ServerConfig` loaded from the environment
//! - **`state`** - `AppState` and its `FromRef` implementations
//! - **`init`** - Store/geocoder selection and app creation
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env`; a missing `JWT_KEY` is fatal
//! 2. **Store Selection**: PostgreSQL with migrations, or in-memory
//! 3. **State Creation**: token authenticator, bcrypt, geocoder, linker
//! 4. **Router Creation**: routes, auth middleware, CORS, tracing

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{ConfigError, ServerConfig};
pub use init::{create_app, StartupError};
pub use state::AppState;
