//! Application fixtures
//!
//! Builds the real router over an in-memory store, a fixed geocoder and a
//! low bcrypt cost so HTTP tests run fast and in isolation.

use std::path::PathBuf;
use std::sync::Arc;

use axum_test::TestServer;
use tempfile::TempDir;
use yourplaces::backend::auth::{BcryptVerifier, TokenAuthenticator};
use yourplaces::backend::places::{DiskImageStore, FixedGeocoder, Geocoder, ImageStore, NoopImageStore};
use yourplaces::backend::routes::create_router;
use yourplaces::backend::server::AppState;
use yourplaces::backend::store::MemoryStore;

/// Signing key shared by every test app
pub const TEST_JWT_KEY: &[u8] = b"integration-test-signing-key";

/// A running test server plus handles on its internals
pub struct TestApp {
    pub server: TestServer,
    pub store: MemoryStore,
    pub state: AppState,
    pub upload_dir: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    /// In-memory app whose image store keeps nothing
    pub fn new() -> Self {
        Self::build(Arc::new(FixedGeocoder::default()), |_| Arc::new(NoopImageStore))
    }

    /// In-memory app that deletes images from a temporary upload directory
    pub fn with_disk_images() -> Self {
        Self::build(Arc::new(FixedGeocoder::default()), |dir| {
            Arc::new(DiskImageStore::new(dir.to_path_buf()))
        })
    }

    pub fn with_geocoder(geocoder: Arc<dyn Geocoder>) -> Self {
        Self::build(geocoder, |_| Arc::new(NoopImageStore))
    }

    fn build(
        geocoder: Arc<dyn Geocoder>,
        images: impl FnOnce(&std::path::Path) -> Arc<dyn ImageStore>,
    ) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create upload dir");
        let upload_dir = dir.path().to_path_buf();
        let store = MemoryStore::new();

        let state = AppState::new(
            Arc::new(store.clone()),
            TokenAuthenticator::new(TEST_JWT_KEY),
            Arc::new(BcryptVerifier::new(4)),
            geocoder,
            images(&upload_dir),
        );
        let server = TestServer::new(create_router(state.clone(), &upload_dir))
            .expect("Failed to start test server");

        Self {
            server,
            store,
            state,
            upload_dir,
            _dir: dir,
        }
    }
}
