//! Product route handlers.
//!
//! The product detail dialog is served two ways: as a full page for direct
//! links, and as a `<dialog>` fragment that htmx drops onto the catalog page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use rust_decimal::Decimal;
use tower_sessions::Session;
use tracing::instrument;
use verdant_core::{Price, Product, ProductId};

use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalUser;
use crate::models::load_cart;
use crate::routes::account::UserView;
use crate::routes::cart::{CartView, MAX_ADD_QUANTITY};
use crate::state::AppState;

/// Number of other products suggested under the detail page.
const RELATED_PRODUCTS: usize = 3;

/// Product flagged with the "New" badge.
const NEW_PRODUCT_ID: ProductId = ProductId::new(1);

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub price: String,
    pub image: String,
    pub description: String,
    /// Struck-through "was" price shown next to the real one.
    pub compare_at_price: String,
    pub is_new: bool,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price.display(),
            image: product.image.clone(),
            description: product.description.clone(),
            compare_at_price: compare_at(&product.price),
            is_new: product.id == NEW_PRODUCT_ID,
        }
    }
}

/// The price marked up by 20%.
fn compare_at(price: &Price) -> String {
    Price::try_new(price.amount() * Decimal::new(12, 1), price.currency_code())
        .map(|marked_up| marked_up.display())
        .unwrap_or_default()
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub cart: CartView,
    pub user: Option<UserView>,
    pub search: String,
    pub product: ProductView,
    pub related_products: Vec<ProductView>,
    pub max_quantity: i64,
}

/// Product detail dialog fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/quick_view.html")]
pub struct QuickViewTemplate {
    pub product: ProductView,
    pub max_quantity: i64,
}

/// Display product detail page.
#[instrument(skip(state, session, user))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    OptionalUser(user): OptionalUser,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    let product = state.catalog().find(id)?;
    let related_products = state
        .catalog()
        .products()
        .map(|products| {
            products
                .iter()
                .filter(|other| other.id != id)
                .take(RELATED_PRODUCTS)
                .map(ProductView::from)
                .collect()
        })
        .unwrap_or_default();
    let cart = load_cart(&session).await?;

    Ok(ProductShowTemplate {
        cart: CartView::from(&cart),
        user: user.as_ref().map(UserView::from),
        search: String::new(),
        product: ProductView::from(&product),
        related_products,
        max_quantity: MAX_ADD_QUANTITY,
    })
}

/// Display the product detail dialog fragment (for htmx).
#[instrument(skip(state))]
pub async fn quick_view(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    let product = state.catalog().find(id)?;

    Ok(QuickViewTemplate {
        product: ProductView::from(&product),
        max_quantity: MAX_ADD_QUANTITY,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_view_prices() {
        let product = Product {
            id: ProductId::new(1),
            name: "Eco-friendly Water Bottle".to_string(),
            price: Price::usd_cents(2499),
            image: "/static/images/eco_bottle.svg".to_string(),
            description: String::new(),
        };

        let view = ProductView::from(&product);

        assert_eq!(view.price, "$24.99");
        assert_eq!(view.compare_at_price, "$29.99");
        assert!(view.is_new);
    }

    #[test]
    fn test_only_first_product_is_new() {
        let products = crate::catalog::mock_products();
        let new: Vec<ProductId> = products
            .iter()
            .map(ProductView::from)
            .filter(|view| view.is_new)
            .map(|view| view.id)
            .collect();
        assert_eq!(new, vec![ProductId::new(1)]);
    }
}
