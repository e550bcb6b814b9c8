//! In-memory catalog sources.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use verdant_core::{Price, Product, ProductId};

use super::{CatalogError, CatalogSource};

/// Image shared by every mock product until real photography exists.
const PLACEHOLDER_IMAGE: &str = "/static/images/eco_bottle.svg";

/// The six products the shop sells, in display order.
#[must_use]
pub fn mock_products() -> Vec<Product> {
    [
        (
            1,
            "Eco-friendly Water Bottle",
            2499,
            "Durable and stylish water bottle made from recycled materials.",
        ),
        (
            2,
            "Organic Cotton T-shirt",
            2999,
            "Soft and comfortable t-shirt made from 100% organic cotton.",
        ),
        (
            3,
            "Recycled Denim Jeans",
            7999,
            "Stylish jeans made from recycled denim, reducing waste in the fashion industry.",
        ),
        (
            4,
            "Bamboo Toothbrush Set",
            1299,
            "Set of eco-friendly toothbrushes with bamboo handles and soft bristles.",
        ),
        (
            5,
            "Solar-powered Backpack",
            12999,
            "Innovative backpack with built-in solar panel to charge your devices on the go.",
        ),
        (
            6,
            "Reusable Produce Bags",
            1599,
            "Set of mesh produce bags to replace single-use plastic bags at the grocery store.",
        ),
    ]
    .into_iter()
    .map(|(id, name, cents, description)| Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::usd_cents(cents),
        image: PLACEHOLDER_IMAGE.to_string(),
        description: description.to_string(),
    })
    .collect()
}

/// Catalog source that returns [`mock_products`] after a fixed delay.
#[derive(Debug, Clone)]
pub struct MockCatalog {
    delay: Duration,
}

impl MockCatalog {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl CatalogSource for MockCatalog {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        debug!(delay = ?self.delay, "Simulating catalog latency");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(mock_products())
    }
}

/// Catalog source that always fails.
///
/// Selected with `VERDANT_CATALOG_SOURCE=unavailable` to exercise the error
/// page and the retry button.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableCatalog;

#[async_trait]
impl CatalogSource for UnavailableCatalog {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        Err(CatalogError::Unavailable(
            "catalog source is switched off".to_string(),
        ))
    }
}
