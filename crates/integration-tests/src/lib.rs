//! Integration tests for the Verdant storefront.
//!
//! The storefront router is driven in-process with `tower::ServiceExt::oneshot`,
//! so no server, port or browser is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p verdant-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_catalog` - Catalog page, search, loading and error states
//! - `storefront_products` - Product detail page and dialog
//! - `storefront_cart` - Cart operations through the HTTP surface
//! - `storefront_account` - Stub login and logout

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use verdant_storefront::{
    app,
    catalog::{CatalogSource, MockCatalog, UnavailableCatalog},
    config::StorefrontConfig,
    state::AppState,
};

/// A storefront router plus the visitor's session cookie.
///
/// Each `TestStorefront` is one visitor: the session cookie set by the first
/// response that touches the session is sent with every later request.
pub struct TestStorefront {
    state: AppState,
    router: Router,
    cookie: Option<String>,
}

/// A buffered response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }
}

impl TestStorefront {
    /// Storefront whose catalog has finished loading the mock products.
    pub async fn ready() -> Self {
        let storefront = Self::loading();
        storefront.state.catalog().refresh().await;
        storefront
    }

    /// Storefront whose catalog fetch hasn't started.
    #[must_use]
    pub fn loading() -> Self {
        Self::with_source(Arc::new(MockCatalog::new(Duration::ZERO)))
    }

    /// Storefront whose catalog fetch has failed.
    pub async fn unavailable() -> Self {
        let storefront = Self::with_source(Arc::new(UnavailableCatalog));
        storefront.state.catalog().refresh().await;
        storefront
    }

    /// Storefront over an arbitrary catalog source.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration fails to load.
    #[must_use]
    pub fn with_source(source: Arc<dyn CatalogSource>) -> Self {
        let config =
            StorefrontConfig::from_vars(|_| None).expect("default configuration is valid");
        let state = AppState::with_catalog_source(config, source);
        Self {
            router: app(state.clone()),
            state,
            cookie: None,
        }
    }

    /// Shared application state, for driving the catalog directly.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// GET `uri`.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request("GET", uri).body(Body::empty());
        self.send(request).await
    }

    /// POST a form the way a browser without JavaScript would.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(encode_form(fields)));
        self.send(request).await
    }

    /// POST a form the way htmx would.
    pub async fn htmx_post(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let request = self
            .request("POST", uri)
            .header("hx-request", "true")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(encode_form(fields)));
        self.send(request).await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(
        &mut self,
        request: Result<Request<Body>, axum::http::Error>,
    ) -> TestResponse {
        let request = request.expect("request is well-formed");
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
        {
            self.cookie = Some(cookie.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body is readable")
            .to_bytes();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

fn encode_form(fields: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish()
}
