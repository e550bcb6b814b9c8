//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with a `request_id` field)
//! 3. Request ID (fill in the span field, echo the header)
//! 4. Security headers
//! 5. Session layer (tower-sessions with in-memory store)

pub mod auth;
pub mod htmx;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{OptionalUser, clear_current_user, set_current_user};
pub use htmx::HtmxRequest;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
