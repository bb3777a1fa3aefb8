//! Homepage: the full product grid.

use tracing::{info, warn};

use crate::api::CatalogApi;
use crate::models::Product;
use crate::render;
use crate::routes::{Navigation, Route};
use crate::state::LoadState;

/// Product grid backed by one catalog fetch per mount.
pub struct CatalogPage<'a> {
    api: &'a dyn CatalogApi,
    state: LoadState<Vec<Product>>,
}

impl<'a> CatalogPage<'a> {
    /// Create an unmounted page in the `Loading` state.
    pub fn new(api: &'a dyn CatalogApi) -> Self {
        Self {
            api,
            state: LoadState::Loading,
        }
    }

    /// Fetch the catalog and replace the page state.
    ///
    /// Runs unconditionally; there is no caching between mounts.
    pub fn mount(&mut self) -> &LoadState<Vec<Product>> {
        self.state = LoadState::Loading;
        let result = self.api.list_products();
        match &result {
            Ok(products) => info!(count = products.len(), "catalog ready"),
            Err(e) => warn!(error = %e, "catalog failed to load"),
        }
        self.state = result.into();
        &self.state
    }

    pub fn state(&self) -> &LoadState<Vec<Product>> {
        &self.state
    }

    pub fn products(&self) -> &[Product] {
        self.state.ready().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Navigation behind a grid entry's "View Product" action.
    pub fn view_product(&self, id: &str) -> Navigation {
        Navigation::to(Route::Product(id.to_string()))
    }

    pub fn render(&self) -> String {
        render::catalog(&self.state)
    }
}
