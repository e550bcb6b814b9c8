//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Catalog page (?q= filters by name)
//! POST /catalog/retry          - Start a new catalog fetch ("Try Again")
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (catalog loaded)
//!
//! # Products
//! GET  /products/{id}          - Product detail
//! GET  /products/{id}/quick-view - Product detail dialog fragment (HTMX)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart dropdown
//! GET  /cart/count             - Cart count badge
//! POST /cart/add               - Add to cart (returns cart dropdown, triggers cart-updated)
//! POST /cart/update            - Set quantity (zero removes)
//! POST /cart/remove            - Remove line
//!
//! # Account
//! GET  /account                - User dropdown
//! POST /account/login          - Stub login
//! POST /account/logout         - Logout
//! ```

pub mod account;
pub mod cart;
pub mod catalog;
pub mod health;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(products::show))
        .route("/{id}/quick-view", get(products::quick_view))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::show))
        .route("/login", post(account::login))
        .route("/logout", post(account::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/catalog/retry", post(catalog::retry))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/account", account_routes())
}
