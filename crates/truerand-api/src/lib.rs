//! Truerand API — HTTP surface for the entropy service.

use axum::Router;
use tower_http::cors::CorsLayer;

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;

use crate::state::AppState;

/// Builds the application router: an unthrottled health check plus the
/// rate-limited, cross-origin `/api/v1` group.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest(
            "/api/v1",
            routes::generate::router(&state).layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
