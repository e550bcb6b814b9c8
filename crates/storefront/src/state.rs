//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::{Catalog, CatalogSource};
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Per-visitor state (cart,
/// identity) is not here; it lives in the session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
}

impl AppState {
    /// Create application state with the catalog source named in `config`.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let source = config.catalog_source();
        Self::with_catalog_source(config, source)
    }

    /// Create application state with an explicit catalog source.
    #[must_use]
    pub fn with_catalog_source(config: StorefrontConfig, source: Arc<dyn CatalogSource>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: Catalog::new(source),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Kick off the initial catalog fetch in the background.
    pub fn start_catalog_loading(&self) {
        self.inner.catalog.start_loading();
    }
}
