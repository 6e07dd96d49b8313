//! Integration tests
//!
//! - **`api`** - HTTP flows through the real router
//! - **`geocode_test`** - Google geocoder against a mock server

pub mod api;
pub mod geocode_test;
