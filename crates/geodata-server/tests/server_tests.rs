//! Integration tests for the server-level endpoints

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt; // for `oneshot`

mod helpers;
use helpers::{setup_lazy_pool, setup_test_app, setup_test_db};

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_root_banner() {
    let app = setup_test_app(setup_lazy_pool());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Geodata Server");
    assert_eq!(json["status"], "running");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = setup_test_app(setup_lazy_pool());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/no/such/route")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore] // Requires a configured PostgreSQL (TEST_DATABASE_URL)
async fn test_health_reports_database_connectivity() {
    let pool = setup_test_db().await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"], "connected");
}
