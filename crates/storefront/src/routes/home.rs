//! Catalog page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::{CatalogState, filter_products};
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalUser;
use crate::models::load_cart;
use crate::routes::account::UserView;
use crate::routes::cart::CartView;
use crate::routes::products::ProductView;
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

impl SearchQuery {
    /// The search term with surrounding whitespace removed.
    #[must_use]
    pub fn term(&self) -> &str {
        self.q.as_deref().map_or("", str::trim)
    }
}

/// Catalog page template.
///
/// `loading` and `error` are mutually exclusive; `products` is only filled
/// when both are unset.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub cart: CartView,
    pub user: Option<UserView>,
    pub search: String,
    pub loading: bool,
    pub error: Option<String>,
    pub products: Vec<ProductView>,
}

/// Display the catalog page, filtered by `?q=` when given.
#[instrument(skip(state, session, user))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    OptionalUser(user): OptionalUser,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse> {
    let cart = load_cart(&session).await?;
    let search = query.term().to_string();

    let (loading, error, products) = match state.catalog().state() {
        CatalogState::Loading => (true, None, Vec::new()),
        CatalogState::Failed(message) => (false, Some(message), Vec::new()),
        CatalogState::Ready(products) => {
            let shown = filter_products(&products, &search)
                .iter()
                .map(ProductView::from)
                .collect();
            (false, None, shown)
        }
    };

    Ok(HomeTemplate {
        cart: CartView::from(&cart),
        user: user.as_ref().map(UserView::from),
        search,
        loading,
        error,
        products,
    })
}
