//! Verdant storefront library.
//!
//! This crate provides the storefront as a library, so the router can be
//! driven in-process by tests as well as served by the binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

use axum::{Router, body::Body, http::Request, middleware::from_fn};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::{
    create_session_layer, request_id_middleware, security_headers_middleware,
};
use crate::state::AppState;

/// Directory static assets are served from, relative to the workspace root.
pub const STATIC_DIR: &str = "crates/storefront/static";

/// Build the storefront router with its middleware stack.
///
/// Sentry layers are not included; the binary wraps the result in them.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = tracing::field::Empty,
        )
    });

    routes::routes()
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(trace_layer)
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::{MockCatalog, UnavailableCatalog};
    use crate::config::StorefrontConfig;
    use crate::middleware::request_id::REQUEST_ID_HEADER;

    fn config() -> StorefrontConfig {
        let vars: HashMap<String, String> = HashMap::new();
        StorefrontConfig::from_vars(|key| vars.get(key).cloned()).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_ok_while_loading() {
        let state =
            AppState::with_catalog_source(config(), Arc::new(MockCatalog::new(Duration::ZERO)));
        let app = app(state);

        let response = app.clone().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"ok");

        let response = app.oneshot(get("/health/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_readiness_follows_catalog() {
        let state =
            AppState::with_catalog_source(config(), Arc::new(MockCatalog::new(Duration::ZERO)));
        state.catalog().refresh().await;

        let response = app(state).oneshot(get("/health/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let failed = AppState::with_catalog_source(config(), Arc::new(UnavailableCatalog));
        failed.catalog().refresh().await;

        let response = app(failed).oneshot(get("/health/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_responses_carry_request_id_and_security_headers() {
        let state = AppState::with_catalog_source(config(), Arc::new(UnavailableCatalog));

        let response = app(state).oneshot(get("/health")).await.unwrap();

        let headers = response.headers();
        assert!(headers.contains_key(REQUEST_ID_HEADER));
        assert_eq!(headers["x-frame-options"], "DENY");
        assert_eq!(headers["cache-control"], "no-store, max-age=0");
    }
}
