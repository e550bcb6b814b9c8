//! Shopping cart state.
//!
//! A [`Cart`] is an ordered list of [`CartLine`]s with two invariants:
//!
//! - at most one line per product ID
//! - every line has a quantity of at least 1
//!
//! Every mutation keeps both. Mutations never fail: out-of-range quantities
//! are treated as "remove", and operations on absent lines are no-ops.
//!
//! # Example
//!
//! ```
//! use verdant_core::{Cart, Price, Product, ProductId};
//!
//! let bottle = Product {
//!     id: ProductId::new(1),
//!     name: "Eco-friendly Water Bottle".to_string(),
//!     price: Price::usd_cents(2499),
//!     image: "/static/images/eco_bottle.svg".to_string(),
//!     description: String::new(),
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_item(&bottle);
//! cart.add_item(&bottle);
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.total().display(), "$49.98");
//!
//! cart.set_quantity(bottle.id, 0);
//! assert!(cart.is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::{CurrencyCode, Price, Product, ProductId};

/// One row of the cart: a product and how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    product: Product,
    quantity: u32,
}

impl CartLine {
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// The shopping cart.
///
/// Deserializing goes through [`Cart::from_lines`], so a cart read back from
/// session storage satisfies the invariants even if the stored value doesn't.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredCart")]
pub struct Cart {
    lines: Vec<CartLine>,
}

/// Wire shape of a cart before invariants are re-established.
#[derive(Deserialize)]
struct StoredCart {
    lines: Vec<CartLine>,
}

impl From<StoredCart> for Cart {
    fn from(stored: StoredCart) -> Self {
        Self::from_lines(stored.lines)
    }
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from raw lines.
    ///
    /// Lines with a zero quantity are dropped and lines sharing a product ID
    /// are merged into the first occurrence (quantities summed, saturating).
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.line_mut(line.product.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line for `product.id`, or appends a new line
    /// with quantity 1.
    pub fn add_item(&mut self, product: &Product) {
        self.add_items(product, 1);
    }

    /// Add `quantity` units of `product` in one step.
    ///
    /// Equivalent to calling [`Cart::add_item`] `quantity` times. Zero is a
    /// no-op.
    pub fn add_items(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.line_mut(product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine {
                product: product.clone(),
                quantity,
            }),
        }
    }

    /// Remove the line for `product_id`. Absent lines are a no-op.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.lines.retain(|line| line.product.id != product_id);
    }

    /// Replace the quantity of the line for `product_id`.
    ///
    /// A quantity of zero or less removes the line. Setting the quantity of a
    /// product that isn't in the cart does nothing; it does not insert a line.
    pub fn set_quantity(&mut self, product_id: ProductId, new_quantity: i64) {
        if new_quantity <= 0 {
            self.remove_item(product_id);
            return;
        }
        let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
        }
    }

    /// Sum of `price * quantity` over all lines.
    ///
    /// Computed on every call. Line prices are non-negative, so the sum is too. The currency is that of the first line, or USD
    /// for an empty cart.
    #[must_use]
    pub fn total(&self) -> Price {
        let currency = self
            .lines
            .first()
            .map_or(CurrencyCode::default(), |line| {
                line.product.price.currency_code()
            });
        let amount = self
            .lines
            .iter()
            .map(|line| line.line_total().amount())
            .sum();
        Price::new_unchecked(amount, currency)
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// The line for `product_id`, if any.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == product_id)
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product.id == product_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: i32, cents: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::usd_cents(cents),
            image: "/static/images/eco_bottle.svg".to_string(),
            description: String::new(),
        }
    }

    fn expected_total(cart: &Cart) -> Decimal {
        cart.lines()
            .iter()
            .map(|line| line.product().price.amount() * Decimal::from(line.quantity()))
            .sum()
    }

    #[test]
    fn test_repeated_add_keeps_one_line() {
        let bottle = product(1, 2499);
        let mut cart = Cart::new();
        for _ in 0..7 {
            cart.add_item(&bottle);
        }

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(bottle.id).unwrap().quantity(), 7);
    }

    #[test]
    fn test_products_never_added_have_no_line() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 100));
        cart.add_item(&product(3, 100));

        assert!(cart.line(ProductId::new(2)).is_none());
        assert!(cart.line(ProductId::new(4)).is_none());
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(&product(3, 100));
        cart.add_item(&product(1, 100));
        cart.add_item(&product(3, 100));

        let ids: Vec<i32> = cart.lines().iter().map(|l| l.product_id().as_i32()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_remove_item_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 100));
        cart.add_item(&product(2, 100));

        cart.remove_item(ProductId::new(1));
        let after_first = cart.clone();
        cart.remove_item(ProductId::new(1));

        assert_eq!(cart, after_first);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_absent_item_on_empty_cart() {
        let mut cart = Cart::new();
        cart.remove_item(ProductId::new(9));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_zero_or_negative_removes() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 100));
        cart.add_item(&product(2, 100));

        cart.set_quantity(ProductId::new(1), 0);
        cart.set_quantity(ProductId::new(2), -3);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_on_absent_product_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 100));

        cart.set_quantity(ProductId::new(2), 4);

        assert_eq!(cart.len(), 1);
        assert!(cart.line(ProductId::new(2)).is_none());
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_set_quantity_saturates_huge_values() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 1));

        cart.set_quantity(ProductId::new(1), i64::MAX);

        assert_eq!(cart.line(ProductId::new(1)).unwrap().quantity(), u32::MAX);
    }

    #[test]
    fn test_add_items_matches_repeated_add_item() {
        let jeans = product(3, 7999);
        let mut bulk = Cart::new();
        bulk.add_items(&jeans, 4);

        let mut single = Cart::new();
        for _ in 0..4 {
            single.add_item(&jeans);
        }

        assert_eq!(bulk, single);

        bulk.add_items(&jeans, 0);
        assert_eq!(bulk, single);
    }

    #[test]
    fn test_scenario_from_add_to_remove() {
        let bottle = product(1, 2499);
        let mut cart = Cart::new();

        cart.add_item(&bottle);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total().amount(), Decimal::new(2499, 2));

        cart.add_item(&bottle);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total().amount(), Decimal::new(4998, 2));

        cart.set_quantity(bottle.id, 5);
        assert_eq!(cart.total().amount(), Decimal::new(12495, 2));
        assert_eq!(cart.total().display(), "$124.95");

        cart.remove_item(bottle.id);
        assert!(cart.is_empty());
        assert_eq!(cart.total().amount(), Decimal::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_total_tracks_interleaved_mutations() {
        let catalog: Vec<Product> = vec![
            product(1, 2499),
            product(2, 2999),
            product(3, 7999),
            product(4, 1299),
        ];
        let mut cart = Cart::new();

        // Deterministic pseudo-random walk over the three mutations.
        let mut seed: u64 = 0x5eed;
        for step in 0..500 {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            let pick = &catalog[usize::try_from(seed >> 62).unwrap()];
            match step % 3 {
                0 => cart.add_item(pick),
                1 => cart.set_quantity(pick.id, i64::try_from(seed % 7).unwrap() - 2),
                _ if seed % 5 == 0 => cart.remove_item(pick.id),
                _ => cart.add_item(pick),
            }

            assert_eq!(cart.total().amount(), expected_total(&cart));
            assert!(cart.lines().iter().all(|line| line.quantity() > 0));
        }
    }

    #[test]
    fn test_empty_cart_total_is_zero_usd() {
        let cart = Cart::new();
        assert_eq!(cart.total(), Price::zero(CurrencyCode::USD));
        assert_eq!(cart.total().display(), "$0.00");
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add_items(&product(1, 100), 3);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_deserialize_restores_invariants() {
        let bottle = serde_json::to_value(product(1, 2499)).unwrap();
        let shirt = serde_json::to_value(product(2, 2999)).unwrap();
        let stored = serde_json::json!({
            "lines": [
                { "product": bottle, "quantity": 2 },
                { "product": shirt, "quantity": 0 },
                { "product": bottle, "quantity": 3 },
            ]
        });

        let cart: Cart = serde_json::from_value(stored).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(ProductId::new(1)).unwrap().quantity(), 5);
    }

    #[test]
    fn test_deserialize_rejects_negative_line_price() {
        let mut bottle = serde_json::to_value(product(1, 2499)).unwrap();
        bottle["price"]["amount"] = serde_json::Value::from("-24.99");
        let stored = serde_json::json!({
            "lines": [{ "product": bottle, "quantity": 1 }]
        });

        assert!(serde_json::from_value::<Cart>(stored).is_err());
    }

    #[test]
    fn test_session_roundtrip() {
        let mut cart = Cart::new();
        cart.add_items(&product(5, 12999), 2);
        cart.add_item(&product(6, 1599));

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, cart);
    }
}
