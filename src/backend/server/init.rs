/**
 * Server Initialization
 *
 * Builds the application state and router from a [`ServerConfig`].
 *
 * # Initialization Process
 *
 * 1. Create the upload directory
 * 2. Pick the store: PostgreSQL (with migrations) or in-memory
 * 3. Pick the geocoder: Google or fixed coordinates
 * 4. Assemble `AppState` and the router
 *
 * A database that cannot be reached or migrated stops startup; running
 * against a half-migrated schema could break the user/place invariant.
 */

use std::sync::Arc;

use axum::Router;
use thiserror::Error;

use crate::backend::auth::credentials::BcryptVerifier;
use crate::backend::auth::sessions::TokenAuthenticator;
use crate::backend::places::geocode::{FixedGeocoder, Geocoder, GoogleGeocoder};
use crate::backend::places::images::DiskImageStore;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;
use crate::backend::store::{MemoryStore, PgStore, PlaceStore, StoreError};

/// Fatal startup failures
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("database error: {0}")]
    Store(#[from] StoreError),
    #[error("could not prepare upload directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Create and configure the Axum application
///
/// Returns the router together with the state, so the caller can close the
/// store on shutdown.
pub async fn create_app(config: &ServerConfig) -> Result<(Router, AppState), StartupError> {
    tracing::info!("Initializing YourPlaces backend server");

    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let store: Arc<dyn PlaceStore> = match &config.database_url {
        Some(url) => {
            let store = PgStore::connect(url).await?;
            store.migrate().await?;
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set. Using in-memory store; data is lost on restart.");
            Arc::new(MemoryStore::new())
        }
    };

    let geocoder: Arc<dyn Geocoder> = match &config.google_api_key {
        Some(key) => Arc::new(GoogleGeocoder::new(key.clone())),
        None => {
            tracing::warn!("GOOGLE_API_KEY not set. Every address resolves to fixed coordinates.");
            Arc::new(FixedGeocoder::default())
        }
    };

    let state = AppState::new(
        store,
        TokenAuthenticator::new(config.jwt_key.as_bytes()),
        Arc::new(BcryptVerifier::new(config.bcrypt_cost)),
        geocoder,
        Arc::new(DiskImageStore::new(config.upload_dir.clone())),
    );

    let app = create_router(state.clone(), &config.upload_dir);
    tracing::info!("Router configured");

    Ok((app, state))
}
