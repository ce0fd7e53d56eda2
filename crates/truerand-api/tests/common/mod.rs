//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::TimeZone;
use http_body_util::BodyExt;
use tower::ServiceExt;
use truerand_core::clock::Clock;
use truerand_core::entropy::EntropySource;
use truerand_core::rate_limit::{RateLimit, RateLimiter};
use truerand_test_support::FixedClock;

use truerand_api::build_router;
use truerand_api::state::AppState;

/// Generation bound used across integration tests.
pub const READ_TIMEOUT: Duration = Duration::from_millis(250);

/// Frozen clock so that no tokens refill while a test runs.
fn frozen_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::Utc
            .with_ymd_and_hms(2026, 1, 15, 10, 0, 0)
            .unwrap(),
    ))
}

/// Build application state around `source` with the reference limiter and a
/// frozen clock.
pub fn test_state(source: Arc<dyn EntropySource>) -> AppState {
    test_state_with_clock(source, frozen_clock())
}

/// Build application state around `source` with the reference limiter driven
/// by `clock`.
pub fn test_state_with_clock(source: Arc<dyn EntropySource>, clock: Arc<dyn Clock>) -> AppState {
    let limiter = Arc::new(RateLimiter::new(RateLimit::default(), clock));
    AppState::new(limiter, source, Some(READ_TIMEOUT))
}

/// Build the full app router. Uses the same route structure as `main.rs`.
pub fn build_test_app(state: AppState) -> Router {
    build_router(state)
}

/// Send a GET request and return the status and JSON body.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
