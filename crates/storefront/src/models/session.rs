//! Session-stored visitor state.
//!
//! Each visitor's cart and identity live in their session. Handlers load them
//! at the start of a request, mutate the loaded value, and store it back.

use tower_sessions::Session;
use verdant_core::Cart;

/// Session keys for visitor data.
pub mod keys {
    /// Key for the visitor's cart.
    pub const CART: &str = "cart";

    /// Key for the stub-logged-in identity.
    pub const CURRENT_USER: &str = "current_user";
}

/// Load the visitor's cart, or an empty cart if none is stored yet.
///
/// # Errors
///
/// Returns an error if the session store cannot be read or holds something
/// that isn't a cart.
pub async fn load_cart(session: &Session) -> Result<Cart, tower_sessions::session::Error> {
    Ok(session.get::<Cart>(keys::CART).await?.unwrap_or_default())
}

/// Store the visitor's cart.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn store_cart(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART, cart).await
}
