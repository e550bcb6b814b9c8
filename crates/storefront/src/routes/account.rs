//! Account dropdown handlers.
//!
//! Login assigns the placeholder identity; there is no password, no account
//! store and nothing to protect.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::Response;
use tower_sessions::Session;
use tracing::instrument;
use verdant_core::UserIdentity;

use crate::error::{Result, add_breadcrumb};
use crate::middleware::{HtmxRequest, OptionalUser, clear_current_user, set_current_user};

/// User display data for templates.
#[derive(Clone)]
pub struct UserView {
    pub name: String,
    pub email: String,
}

impl From<&UserIdentity> for UserView {
    fn from(user: &UserIdentity) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.to_string(),
        }
    }
}

/// User dropdown fragment template (for htmx).
#[derive(Template, WebTemplate)]
#[template(path = "partials/user_dropdown.html")]
pub struct UserDropdownTemplate {
    pub user: Option<UserView>,
}

/// Display the user dropdown.
pub async fn show(OptionalUser(user): OptionalUser) -> UserDropdownTemplate {
    UserDropdownTemplate {
        user: user.as_ref().map(UserView::from),
    }
}

/// Stub login: store the placeholder identity in the session.
#[instrument(skip(session))]
pub async fn login(session: Session, hx: HtmxRequest) -> Result<Response> {
    let user = UserIdentity::placeholder();
    set_current_user(&session, &user).await?;

    add_breadcrumb("auth", "Logged in", None);
    tracing::info!(email = %user.email, "Visitor logged in");

    Ok(hx.respond(
        UserDropdownTemplate {
            user: Some(UserView::from(&user)),
        },
        "/",
    ))
}

/// Logout: clear the identity. The cart is kept.
#[instrument(skip(session))]
pub async fn logout(session: Session, hx: HtmxRequest) -> Result<Response> {
    clear_current_user(&session).await?;

    add_breadcrumb("auth", "Logged out", None);

    Ok(hx.respond(UserDropdownTemplate { user: None }, "/"))
}
