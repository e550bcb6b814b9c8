//! Visitor identity extractor and session helpers.
//!
//! Login is a stub: it stores a fixed placeholder identity in the session.
//! Nothing here is a security boundary.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;
use verdant_core::UserIdentity;

use crate::models::session_keys;

/// Extractor that optionally gets the current visitor identity.
///
/// Never rejects: a missing session or a logged-out visitor both give `None`.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(OptionalUser(user): OptionalUser) -> impl IntoResponse {
///     match user {
///         Some(u) => format!("Hello, {}!", u.name),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
pub struct OptionalUser(pub Option<UserIdentity>);

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<UserIdentity>(session_keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Store the visitor identity in the session (login).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &UserIdentity,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Remove the visitor identity from the session (logout).
///
/// The cart stays: logging out doesn't empty it.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<UserIdentity>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}
