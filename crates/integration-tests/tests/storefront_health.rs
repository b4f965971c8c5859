//! Health endpoint tests.

use axum::http::StatusCode;

use cafego_integration_tests::TestApp;

#[tokio::test]
async fn test_liveness() {
    let mut app = TestApp::spawn_empty().await;

    let response = app.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_readiness() {
    let mut app = TestApp::spawn_empty().await;

    assert_eq!(app.get("/health/ready").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_fails_when_database_is_closed() {
    let mut app = TestApp::spawn_empty().await;
    app.pool.close().await;

    assert_eq!(
        app.get("/health/ready").await.status,
        StatusCode::SERVICE_UNAVAILABLE
    );
}
