//! Cart route handlers.
//!
//! The cart lives in the visitor's session. Each handler loads it, applies
//! one operation from `verdant_core::Cart`, stores it back and re-renders the
//! cart dropdown. htmx requests get the fragment; plain form posts are
//! redirected back to the catalog.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use verdant_core::{Cart, CartLine, ProductId};

use crate::error::{Result, add_breadcrumb};
use crate::middleware::HtmxRequest;
use crate::models::{load_cart, store_cart};
use crate::state::AppState;

/// Largest quantity the product dialog lets a visitor add at once.
pub const MAX_ADD_QUANTITY: i64 = 99;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub name: String,
    pub price: String,
    pub quantity: u32,
    pub line_total: String,
    /// Quantity submitted by the "-" button (zero removes the line).
    pub decrement_quantity: i64,
    /// Quantity submitted by the "+" button.
    pub increment_quantity: i64,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u64,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            total: cart.total().display(),
            item_count: cart.item_count(),
        }
    }
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        let quantity = i64::from(line.quantity());
        Self {
            product_id: line.product_id(),
            name: line.product().name.clone(),
            price: line.product().price.display(),
            quantity: line.quantity(),
            line_total: line.line_total().display(),
            decrement_quantity: quantity - 1,
            increment_quantity: quantity + 1,
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    pub quantity: Option<i64>,
}

impl AddToCartForm {
    /// Requested quantity clamped to `1..=MAX_ADD_QUANTITY`.
    #[must_use]
    pub fn clamped_quantity(&self) -> u32 {
        let quantity = self.quantity.unwrap_or(1).clamp(1, MAX_ADD_QUANTITY);
        u32::try_from(quantity).unwrap_or(1)
    }
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

/// Cart dropdown fragment template (for htmx).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_dropdown.html")]
pub struct CartDropdownTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for htmx).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub cart: CartView,
}

/// Dropdown fragment plus the event other page elements listen for.
fn updated(hx: HtmxRequest, cart: &Cart) -> Response {
    hx.respond(
        (
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartDropdownTemplate {
                cart: CartView::from(cart),
            },
        ),
        "/",
    )
}

/// Display the cart dropdown.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<impl IntoResponse> {
    let cart = load_cart(&session).await?;
    Ok(CartDropdownTemplate {
        cart: CartView::from(&cart),
    })
}

/// Display the cart count badge.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<impl IntoResponse> {
    let cart = load_cart(&session).await?;
    Ok(CartCountTemplate {
        cart: CartView::from(&cart),
    })
}

/// Add a product to the cart.
///
/// The product must exist in the loaded catalog. While the catalog is
/// loading or failed, this answers 503 and leaves the cart alone.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    hx: HtmxRequest,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product = state.catalog().find(form.product_id)?;
    let quantity = form.clamped_quantity();

    let mut cart = load_cart(&session).await?;
    cart.add_items(&product, quantity);
    store_cart(&session, &cart).await?;

    let product_id = product.id.to_string();
    let added = quantity.to_string();
    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", product_id.as_str()), ("quantity", added.as_str())]),
    );
    tracing::info!(product_id = %product.id, quantity, items = cart.item_count(), "Added to cart");

    Ok(updated(hx, &cart))
}

/// Set the quantity of a cart line. Zero or less removes it.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    hx: HtmxRequest,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let mut cart = load_cart(&session).await?;
    cart.set_quantity(form.product_id, form.quantity);
    store_cart(&session, &cart).await?;

    Ok(updated(hx, &cart))
}

/// Remove a cart line.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    hx: HtmxRequest,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let mut cart = load_cart(&session).await?;
    cart.remove_item(form.product_id);
    store_cart(&session, &cart).await?;

    let product_id = form.product_id.to_string();
    add_breadcrumb(
        "cart",
        "Removed from cart",
        Some(&[("product_id", product_id.as_str())]),
    );

    Ok(updated(hx, &cart))
}
