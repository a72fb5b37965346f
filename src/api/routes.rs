use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::api::handlers::{health, users};
use crate::api::state::AppState;

/// Builds the application router
///
/// Transport layers (tracing, CORS) are added by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // User routes
        .route("/users", post(users::create_user))
        .route(
            "/users/:id",
            patch(users::update_user).delete(users::delete_user),
        )
        .with_state(state)
}
