//! Cart operations through the HTTP surface.

use axum::http::StatusCode;
use verdant_integration_tests::TestStorefront;

#[tokio::test]
async fn test_cart_starts_empty() {
    let mut shop = TestStorefront::ready().await;

    let resp = shop.get("/cart").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Your cart is empty"));
    assert!(!shop.get("/cart/count").await.body.contains("class=\"badge\""));
}

#[tokio::test]
async fn test_add_update_remove_walkthrough() {
    let mut shop = TestStorefront::ready().await;

    let resp = shop.htmx_post("/cart/add", &[("product_id", "1")]).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.headers["hx-trigger"], "cart-updated");
    assert!(resp.body.contains("$24.99 x 1"));
    assert!(resp.body.contains("Total: $24.99"));

    let resp = shop.htmx_post("/cart/add", &[("product_id", "1")]).await;
    assert!(resp.body.contains("$24.99 x 2"));
    assert!(resp.body.contains("Total: $49.98"));

    let resp = shop
        .htmx_post("/cart/update", &[("product_id", "1"), ("quantity", "5")])
        .await;
    assert!(resp.body.contains("Total: $124.95"));

    let resp = shop.htmx_post("/cart/remove", &[("product_id", "1")]).await;
    assert!(resp.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_lines_from_different_products_sum() {
    let mut shop = TestStorefront::ready().await;

    shop.htmx_post("/cart/add", &[("product_id", "2"), ("quantity", "2")])
        .await;
    let resp = shop.htmx_post("/cart/add", &[("product_id", "4")]).await;

    assert!(resp.body.contains("$29.99 x 2"));
    assert!(resp.body.contains("$12.99 x 1"));
    assert!(resp.body.contains("Total: $72.97"));

    let count = shop.get("/cart/count").await;
    assert!(count.body.contains("<span class=\"badge\">3</span>"));
}

#[tokio::test]
async fn test_add_quantity_is_clamped() {
    let mut shop = TestStorefront::ready().await;

    let resp = shop
        .htmx_post("/cart/add", &[("product_id", "4"), ("quantity", "500")])
        .await;

    assert!(resp.body.contains("$12.99 x 99"));
}

#[tokio::test]
async fn test_update_to_zero_or_less_removes_line() {
    let mut shop = TestStorefront::ready().await;
    shop.htmx_post("/cart/add", &[("product_id", "3")]).await;
    shop.htmx_post("/cart/add", &[("product_id", "5")]).await;

    let resp = shop
        .htmx_post("/cart/update", &[("product_id", "3"), ("quantity", "0")])
        .await;
    assert!(!resp.body.contains("Recycled Denim Jeans"));
    assert!(resp.body.contains("Solar-powered Backpack"));

    let resp = shop
        .htmx_post("/cart/update", &[("product_id", "5"), ("quantity", "-2")])
        .await;
    assert!(resp.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_update_of_absent_line_is_noop() {
    let mut shop = TestStorefront::ready().await;
    shop.htmx_post("/cart/add", &[("product_id", "1")]).await;

    let resp = shop
        .htmx_post("/cart/update", &[("product_id", "6"), ("quantity", "3")])
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(!resp.body.contains("Reusable Produce Bags"));
    assert!(resp.body.contains("Total: $24.99"));
}

#[tokio::test]
async fn test_unknown_product_leaves_cart_untouched() {
    let mut shop = TestStorefront::ready().await;

    let resp = shop.htmx_post("/cart/add", &[("product_id", "42")]).await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(shop.get("/cart").await.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_add_rejected_when_catalog_failed() {
    let mut shop = TestStorefront::unavailable().await;

    let resp = shop.htmx_post("/cart/add", &[("product_id", "1")]).await;

    assert_eq!(resp.status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(resp.body.contains("Failed to load products"));
    assert!(shop.get("/cart").await.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_add_rejected_while_catalog_loading() {
    let mut shop = TestStorefront::loading();

    let resp = shop.htmx_post("/cart/add", &[("product_id", "1")]).await;

    assert_eq!(resp.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_plain_form_post_redirects_home() {
    let mut shop = TestStorefront::ready().await;

    let resp = shop.post_form("/cart/add", &[("product_id", "1")]).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/"));

    let home = shop.get("/").await;
    assert!(home.body.contains("Total: $24.99"));
    assert!(home.body.contains("<span class=\"badge\">1</span>"));
}

#[tokio::test]
async fn test_carts_are_per_visitor() {
    let mut alice = TestStorefront::ready().await;
    alice.htmx_post("/cart/add", &[("product_id", "1")]).await;

    let mut bob = TestStorefront::ready().await;

    assert!(bob.get("/cart").await.body.contains("Your cart is empty"));
    assert!(alice.get("/cart").await.body.contains("Total: $24.99"));
}
