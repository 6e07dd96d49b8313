/**
 * API Routes
 *
 * ## Users (public)
 * - `GET  /api/users` - User directory
 * - `POST /api/users/signup` - Registration
 * - `POST /api/users/login` - Login
 *
 * ## Places
 * - `GET    /api/places/{pid}` - Place by id (public)
 * - `GET    /api/places/user/{uid}` - Places of a user (public)
 * - `POST   /api/places` - Create (requires token)
 * - `PATCH  /api/places/{pid}` - Edit title/description (requires token, owner only)
 * - `DELETE /api/places/{pid}` - Delete (requires token, owner only)
 *
 * The auth middleware is attached with `route_layer` to the mutating
 * methods only, so the public GETs on the same paths stay open.
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};

use crate::backend::auth::{get_users, login, signup};
use crate::backend::middleware::auth_middleware;
use crate::backend::places::handlers::{
    create_place, delete_place, get_place_by_id, get_places_by_user_id, update_place,
};
use crate::backend::server::state::AppState;

/// Add the `/api` routes to `router`
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let require_token = || from_fn_with_state(app_state.tokens.clone(), auth_middleware);

    router
        .route("/api/users", get(get_users))
        .route("/api/users/signup", post(signup))
        .route("/api/users/login", post(login))
        .route("/api/places", post(create_place).route_layer(require_token()))
        .route("/api/places/user/{uid}", get(get_places_by_user_id))
        .route(
            "/api/places/{pid}",
            get(get_place_by_id).merge(
                patch(update_place)
                    .delete(delete_place)
                    .route_layer(require_token()),
            ),
        )
}
