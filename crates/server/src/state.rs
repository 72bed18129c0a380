//! Application state shared across handlers.

use std::sync::Arc;

use phone_catalog::{Catalog, CategoryRegistry};

use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and gives handlers access to
/// the phone catalog and the category registry.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: Catalog,
    categories: CategoryRegistry,
}

impl AppState {
    /// Create a new application state with an empty catalog sized from `config`.
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        let catalog = Catalog::with_cache_capacity(config.cache_capacity);
        Self::with_catalog(catalog, CategoryRegistry::new())
    }

    /// Create a state around an existing catalog and registry.
    #[must_use]
    pub fn with_catalog(catalog: Catalog, categories: CategoryRegistry) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                catalog,
                categories,
            }),
        }
    }

    /// Get a reference to the phone catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the category registry.
    #[must_use]
    pub fn categories(&self) -> &CategoryRegistry {
        &self.inner.categories
    }
}
