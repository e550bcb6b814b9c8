//! Visitor identity.

use serde::{Deserialize, Serialize};

use crate::Email;

/// Display name and email of a "logged in" visitor.
///
/// This is a placeholder identity, not an authenticated principal: logging in
/// assigns [`UserIdentity::placeholder`] without checking anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub name: String,
    pub email: Email,
}

impl UserIdentity {
    /// Name assigned by the stub login.
    pub const PLACEHOLDER_NAME: &'static str = "John Doe";

    /// Email assigned by the stub login.
    pub const PLACEHOLDER_EMAIL: &'static str = "john@example.com";

    /// The fixed identity handed out by the stub login.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            name: Self::PLACEHOLDER_NAME.to_string(),
            email: Email::new_unchecked(Self::PLACEHOLDER_EMAIL),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_identity() {
        let user = UserIdentity::placeholder();
        assert_eq!(user.name, "John Doe");
        assert_eq!(user.email.as_str(), "john@example.com");
    }

    #[test]
    fn test_identity_serde_roundtrip() {
        let user = UserIdentity::placeholder();
        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, r#"{"name":"John Doe","email":"john@example.com"}"#);
        let parsed: UserIdentity = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, user);
    }
}
