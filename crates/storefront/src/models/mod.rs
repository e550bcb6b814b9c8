//! Storefront models.
//!
//! Domain types live in `verdant_core`; this module holds what is specific to
//! serving them over HTTP.

pub mod session;

pub use session::{keys as session_keys, load_cart, store_cart};
