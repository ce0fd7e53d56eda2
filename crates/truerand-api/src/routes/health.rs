//! Liveness endpoint. Never rate-limited and never touches the entropy device.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Limiter settings echoed back for operators.
#[derive(Debug, Serialize)]
pub struct RateLimitInfo {
    /// Sustained admissions per second.
    pub per_second: f64,
    /// Burst capacity.
    pub burst: u32,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub rate_limit: RateLimitInfo,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let limit = state.limiter.limit();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        rate_limit: RateLimitInfo {
            per_second: limit.rate_per_second(),
            burst: limit.burst(),
        },
    })
}

/// Returns the router serving `/health`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
