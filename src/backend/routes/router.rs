/**
 * Router Configuration
 *
 * Combines the API routes with static image serving, CORS, request
 * tracing and a JSON 404 fallback.
 */

use std::path::Path;

use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN},
        HeaderName, Method,
    },
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// Uploaded images under `upload_dir` are served at `/uploads/images`.
pub fn create_router(app_state: AppState, upload_dir: &Path) -> Router {
    let router = configure_api_routes(Router::new(), &app_state);

    router
        .nest_service("/uploads/images", ServeDir::new(upload_dir))
        .fallback(route_not_found)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([
            ORIGIN,
            HeaderName::from_static("x-requested-with"),
            CONTENT_TYPE,
            ACCEPT,
            AUTHORIZATION,
        ])
}

async fn route_not_found() -> BackendError {
    BackendError::not_found("Could not find this route.")
}
