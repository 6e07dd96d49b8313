/**
 * Application State Management
 *
 * `AppState` is the explicit context every handler receives: the store, the
 * token authenticator, the credential verifier, the geocoder and the
 * ownership linker. There are no globals; the binary builds one state at
 * startup and tests build their own.
 *
 * The `FromRef` implementations let handlers extract only the part they
 * need, e.g. `State(store): State<Arc<dyn PlaceStore>>`.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::credentials::CredentialVerifier;
use crate::backend::auth::sessions::TokenAuthenticator;
use crate::backend::places::geocode::Geocoder;
use crate::backend::places::images::ImageStore;
use crate::backend::places::linker::OwnershipLinker;
use crate::backend::store::PlaceStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// User and place storage
    pub store: Arc<dyn PlaceStore>,
    /// Issues and verifies identity tokens
    pub tokens: Arc<TokenAuthenticator>,
    /// Password hashing boundary
    pub credentials: Arc<dyn CredentialVerifier>,
    /// Address lookup for new places
    pub geocoder: Arc<dyn Geocoder>,
    /// Atomic user/place writes, over the same store
    pub linker: OwnershipLinker,
}

impl AppState {
    pub fn new(
        store: Arc<dyn PlaceStore>,
        tokens: TokenAuthenticator,
        credentials: Arc<dyn CredentialVerifier>,
        geocoder: Arc<dyn Geocoder>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        let linker = OwnershipLinker::new(store.clone(), images);
        Self {
            store,
            tokens: Arc::new(tokens),
            credentials,
            geocoder,
            linker,
        }
    }
}

impl FromRef<AppState> for Arc<dyn PlaceStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for Arc<TokenAuthenticator> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for OwnershipLinker {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.linker.clone()
    }
}
