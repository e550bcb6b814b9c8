//! Product catalog: where products come from and whether they have arrived.
//!
//! # Architecture
//!
//! - [`CatalogSource`] is the contract for fetching products. The storefront
//!   ships [`MockCatalog`] (six hardcoded products after a simulated delay)
//!   and [`UnavailableCatalog`] (always fails).
//! - [`Catalog`] wraps a source with the load state the pages render:
//!   loading, ready or failed.
//!
//! The app starts immediately in the loading state. A background task fetches
//! the products once and swaps the result in. Failures are logged and turned
//! into a user-facing message; there is no automatic retry, the visitor has to
//! press "Try Again" which calls [`Catalog::start_loading`] again.

mod mock;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info, instrument};
use verdant_core::{Product, ProductId};

pub use mock::{MockCatalog, UnavailableCatalog, mock_products};

/// Message shown to visitors when the catalog could not be fetched.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to load products. Please try again later.";

/// Errors a catalog source can report.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The source could not be reached or refused to answer.
    #[error("catalog source unavailable: {0}")]
    Unavailable(String),
}

/// Anything that can produce the list of purchasable products.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the full product list.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the products could not be fetched.
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError>;
}

/// Load state of the catalog.
#[derive(Debug, Clone)]
pub enum CatalogState {
    /// A fetch is outstanding (or hasn't started yet).
    Loading,
    /// Products are available.
    Ready(Arc<[Product]>),
    /// The last fetch failed; holds the message to show.
    Failed(String),
}

impl CatalogState {
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Why a product couldn't be looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    /// The catalog is loading or failed to load.
    NotReady,
    /// The catalog is loaded but has no such product.
    UnknownProduct(ProductId),
}

/// Shared catalog handle.
///
/// Cheaply cloneable; all clones see the same state.
#[derive(Clone)]
pub struct Catalog {
    source: Arc<dyn CatalogSource>,
    state: Arc<RwLock<CatalogState>>,
    fetching: Arc<AtomicBool>,
}

impl Catalog {
    /// Create a catalog in the loading state. Nothing is fetched until
    /// [`Catalog::start_loading`] or [`Catalog::refresh`] is called.
    #[must_use]
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            state: Arc::new(RwLock::new(CatalogState::Loading)),
            fetching: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> CatalogState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The loaded products, if the catalog is ready.
    #[must_use]
    pub fn products(&self) -> Option<Arc<[Product]>> {
        match self.state() {
            CatalogState::Ready(products) => Some(products),
            CatalogState::Loading | CatalogState::Failed(_) => None,
        }
    }

    /// Find a product by ID in the loaded catalog.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotReady`] unless the catalog is loaded, and
    /// [`LookupError::UnknownProduct`] if no product has that ID.
    pub fn find(&self, id: ProductId) -> Result<Product, LookupError> {
        let products = self.products().ok_or(LookupError::NotReady)?;
        products
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or(LookupError::UnknownProduct(id))
    }

    /// Start a fetch on a background task.
    ///
    /// Returns `false` without doing anything if a fetch is already
    /// outstanding. Otherwise the state becomes [`CatalogState::Loading`]
    /// before this returns.
    pub fn start_loading(&self) -> bool {
        if !self.begin_fetch() {
            return false;
        }
        info!("Spawning background catalog fetch");
        let catalog = self.clone();
        tokio::spawn(async move {
            catalog.finish_fetch().await;
        });
        true
    }

    /// Fetch on the current task and wait for the result.
    ///
    /// Returns `false` if another fetch was already outstanding. Dropping the
    /// future mid-fetch leaves the state `Loading` but lets the next fetch
    /// start.
    pub async fn refresh(&self) -> bool {
        if !self.begin_fetch() {
            return false;
        }
        self.finish_fetch().await;
        true
    }

    fn begin_fetch(&self) -> bool {
        if self.fetching.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.set_state(CatalogState::Loading);
        true
    }

    #[instrument(skip_all)]
    async fn finish_fetch(&self) {
        let _fetching = FetchingGuard(&self.fetching);
        let next = match self.source.fetch_products().await {
            Ok(products) => {
                info!(count = products.len(), "Catalog loaded");
                CatalogState::Ready(products.into())
            }
            Err(e) => {
                error!(error = %e, "Error fetching products");
                CatalogState::Failed(FETCH_FAILED_MESSAGE.to_string())
            }
        };
        self.set_state(next);
    }

    fn set_state(&self, next: CatalogState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = next;
    }
}

/// Clears the in-flight flag when a fetch ends, however it ends.
struct FetchingGuard<'a>(&'a AtomicBool);

impl Drop for FetchingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Products whose name contains `term`, ignoring case, in catalog order.
///
/// A blank term returns every product.
#[must_use]
pub fn filter_products(products: &[Product], term: &str) -> Vec<Product> {
    products
        .iter()
        .filter(|product| product.name_matches(term))
        .cloned()
        .collect()
}
