//! Integration tests for the health endpoint.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use truerand_test_support::FixedEntropySource;

#[tokio::test]
async fn test_health_returns_200_with_status_ok() {
    let source = FixedEntropySource::new(vec![]);
    let app = common::build_test_app(common::test_state(Arc::new(source.clone())));

    let (status, json) = common::get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["rate_limit"]["burst"], 8);
    assert_eq!(json["rate_limit"]["per_second"], 8.0);
    assert_eq!(source.opened(), 0);
}

#[tokio::test]
async fn test_health_is_not_rate_limited() {
    let state = common::test_state(Arc::new(FixedEntropySource::new(vec![])));
    while state.limiter.allow() {}

    let (status, _) = common::get_json(common::build_test_app(state), "/health").await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = common::build_test_app(common::test_state(Arc::new(FixedEntropySource::new(
        vec![],
    ))));

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/v1/nonexistent")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
