//! Stub login and logout through the user dropdown.

use axum::http::StatusCode;
use verdant_integration_tests::TestStorefront;

#[tokio::test]
async fn test_logged_out_dropdown() {
    let mut shop = TestStorefront::ready().await;

    let resp = shop.get("/account").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Log in"));
    assert!(!resp.body.contains("Log out"));
}

#[tokio::test]
async fn test_login_then_logout() {
    let mut shop = TestStorefront::ready().await;

    let resp = shop.htmx_post("/account/login", &[]).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("John Doe"));
    assert!(resp.body.contains("john@example.com"));
    assert!(resp.body.contains("Log out"));

    // The identity sticks to the session.
    assert!(shop.get("/").await.body.contains("John Doe"));

    let resp = shop.htmx_post("/account/logout", &[]).await;
    assert!(resp.body.contains("Log in"));
    assert!(!shop.get("/account").await.body.contains("John Doe"));
}

#[tokio::test]
async fn test_logout_keeps_cart() {
    let mut shop = TestStorefront::ready().await;
    shop.htmx_post("/cart/add", &[("product_id", "2")]).await;
    shop.htmx_post("/account/login", &[]).await;

    shop.htmx_post("/account/logout", &[]).await;

    assert!(shop.get("/cart").await.body.contains("Total: $29.99"));
}

#[tokio::test]
async fn test_plain_login_redirects_home() {
    let mut shop = TestStorefront::ready().await;

    let resp = shop.post_form("/account/login", &[]).await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/"));
    assert!(shop.get("/account").await.body.contains("John Doe"));
}
