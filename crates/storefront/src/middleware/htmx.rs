//! HTMX request detection.
//!
//! Cart and account actions answer HTMX requests with a fragment to swap in,
//! and plain form posts with a redirect back to the page (Post/Redirect/Get),
//! so the storefront works with JavaScript disabled.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

/// Header htmx sets on every request it issues.
pub const HX_REQUEST_HEADER: &str = "hx-request";

/// Whether the request came from htmx.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtmxRequest(pub bool);

impl HtmxRequest {
    /// Render `fragment` for htmx, otherwise redirect to `fallback`.
    pub fn respond(self, fragment: impl IntoResponse, fallback: &str) -> Response {
        if self.0 {
            fragment.into_response()
        } else {
            Redirect::to(fallback).into_response()
        }
    }
}

impl<S> FromRequestParts<S> for HtmxRequest
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let is_htmx = parts
            .headers
            .get(HX_REQUEST_HEADER)
            .is_some_and(|value| value.as_bytes() == b"true");
        Ok(Self(is_htmx))
    }
}
