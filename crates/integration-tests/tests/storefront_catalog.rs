//! Catalog and product page tests.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;

use cafego_integration_tests::TestApp;

#[tokio::test]
async fn test_home_lists_seeded_catalog() {
    let mut app = TestApp::spawn().await;

    let response = app.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    for name in ["Americano", "Cappuccino", "Espresso", "Macchiato"] {
        assert!(response.body.contains(name), "missing {name}");
    }
    assert!(response.body.contains("$1.00"));
    assert!(response.body.contains("Log in"));
}

#[tokio::test]
async fn test_home_with_empty_catalog() {
    let mut app = TestApp::spawn_empty().await;

    let response = app.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Nothing on the menu yet."));
}

#[tokio::test]
async fn test_product_detail() {
    let mut app = TestApp::spawn().await;

    // Seed order is alphabetical, so Americano is the first row
    let response = app.get("/product/1").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Americano"));
    assert!(response.body.contains("Hot brewed coffee"));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let mut app = TestApp::spawn().await;

    assert_eq!(app.get("/product/999").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_product_is_not_found() {
    let mut app = TestApp::spawn().await;

    assert_eq!(app.get("/product/abc").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stylesheet_is_served() {
    let mut app = TestApp::spawn().await;

    let response = app.get("/static/css/main.css").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(".site-header"));
}
