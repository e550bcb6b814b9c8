//! Catalog product.

use serde::{Deserialize, Serialize};

use crate::{Price, ProductId};

/// A purchasable item as supplied by the catalog source.
///
/// Products are immutable once loaded; cart lines hold their own copy so a
/// cart keeps rendering even if the catalog is re-fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Path or URL of the product image.
    pub image: String,
    pub description: String,
}

impl Product {
    /// Whether the product name contains `term`, ignoring case.
    ///
    /// A blank term matches every product.
    ///
    /// ```
    /// use verdant_core::{Price, Product, ProductId};
    ///
    /// let bottle = Product {
    ///     id: ProductId::new(1),
    ///     name: "Eco-friendly Water Bottle".to_string(),
    ///     price: Price::usd_cents(2499),
    ///     image: "/static/images/eco_bottle.svg".to_string(),
    ///     description: String::new(),
    /// };
    ///
    /// assert!(bottle.name_matches("WATER"));
    /// assert!(bottle.name_matches(""));
    /// assert!(!bottle.name_matches("jeans"));
    /// ```
    #[must_use]
    pub fn name_matches(&self, term: &str) -> bool {
        let term = term.trim();
        term.is_empty() || self.name.to_lowercase().contains(&term.to_lowercase())
    }
}
