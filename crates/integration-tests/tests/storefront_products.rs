//! Product detail page and dialog fragment.

use axum::http::StatusCode;
use verdant_integration_tests::TestStorefront;

#[tokio::test]
async fn test_product_page_shows_details() {
    let mut shop = TestStorefront::ready().await;

    let resp = shop.get("/products/4").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Bamboo Toothbrush Set"));
    assert!(resp.body.contains("$12.99"));
    assert!(resp.body.contains("(128 reviews)"));
    assert!(resp.body.contains("max=\"99\""));
    assert!(resp.body.contains("You may also like"));
}

#[tokio::test]
async fn test_quick_view_is_a_dialog_fragment() {
    let mut shop = TestStorefront::ready().await;

    let resp = shop.get("/products/1/quick-view").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("<dialog"));
    assert!(resp.body.contains("Eco-friendly Water Bottle"));
    assert!(!resp.body.contains("<html"));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let mut shop = TestStorefront::ready().await;

    assert_eq!(shop.get("/products/99").await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        shop.get("/products/99/quick-view").await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_product_page_unavailable_while_loading() {
    let mut shop = TestStorefront::loading();

    let resp = shop.get("/products/1").await;

    assert_eq!(resp.status, StatusCode::SERVICE_UNAVAILABLE);
}
