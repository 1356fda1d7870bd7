use crate::helpers::{get, test_router, Catalog};
use axum::http::StatusCode;

#[tokio::test]
async fn liveness_probe_answers_ok() {
    let router = test_router(Catalog::default());

    let response = get(&router, "/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "OK");
    assert!(response.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn readiness_probe_reports_missing_database() {
    let router = test_router(Catalog::default());

    let response = get(&router, "/health/ready").await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json()["status"], "not_ready");
}
