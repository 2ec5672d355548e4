pub mod error;
pub mod routes;
pub mod users;
pub mod worker;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::routes::AppState;

/// All `/api/user` routes with CORS and request tracing applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/user", get(routes::get_users).post(routes::add_user))
        .route("/api/user/{user_id}", get(routes::get_user))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
