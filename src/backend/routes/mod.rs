//! Route Configuration Module
//!
//! - **`router`** - Router assembly: static files, CORS, tracing, fallback
//! - **`api_routes`** - `/api/users` and `/api/places` endpoints

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
