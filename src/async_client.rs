//! Async wrapper around [`ShopSphere`] for use in async runtimes (Tokio, etc.).
//!
//! Catalog requests and cart storage run on the blocking thread pool via
//! [`tokio::task::spawn_blocking`]; the simulated checkout delay uses
//! [`tokio::time::sleep`] so the event loop stays free while it elapses.
//!
//! # Example
//!
//! ```no_run
//! use shopsphere::{AsyncShopSphere, CheckoutForm};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let shop = AsyncShopSphere::builder().build().await.unwrap();
//!
//!     let products = shop.list_products().await.unwrap();
//!     shop.add_to_cart(products[0].clone()).await.unwrap();
//!
//!     let _nav = shop
//!         .checkout(CheckoutForm::new("Ada", "1 Main St", "4111111111111111"))
//!         .await
//!         .unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::info;

use crate::api::CatalogApi;
use crate::config;
use crate::error::{Result, ShopError};
use crate::models::{Cart, CheckoutForm, OrderData, Product};
use crate::pages::ORDER_PLACED_NOTICE;
use crate::routes::{Navigation, Route};
use crate::storage::CartRepository;
use crate::ShopSphere;

// ---------------------------------------------------------------------------
// AsyncShopSphereBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncShopSphere`] instance.
pub struct AsyncShopSphereBuilder {
    base_url: String,
    storage_dir: Option<PathBuf>,
    in_memory_cart: bool,
    timeout: Duration,
    checkout_delay: Duration,
    catalog: Option<Box<dyn CatalogApi>>,
    cart_repository: Option<Box<dyn CartRepository>>,
}

impl Default for AsyncShopSphereBuilder {
    fn default() -> Self {
        Self {
            base_url: config::API_BASE.to_string(),
            storage_dir: None,
            in_memory_cart: false,
            timeout: config::DEFAULT_TIMEOUT,
            checkout_delay: config::DEFAULT_CHECKOUT_DELAY,
            catalog: None,
            cart_repository: None,
        }
    }
}

impl AsyncShopSphereBuilder {
    /// Set the catalog API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the directory the cart file is kept in.
    pub fn storage_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Keep the cart in memory only.
    pub fn in_memory_cart(mut self, in_memory: bool) -> Self {
        self.in_memory_cart = in_memory;
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the simulated checkout delay.
    pub fn checkout_delay(mut self, delay: Duration) -> Self {
        self.checkout_delay = delay;
        self
    }

    /// Use a custom catalog source.
    pub fn catalog_api(mut self, api: Box<dyn CatalogApi>) -> Self {
        self.catalog = Some(api);
        self
    }

    /// Use a custom cart store.
    pub fn cart_repository(mut self, repo: Box<dyn CartRepository>) -> Self {
        self.cart_repository = Some(repo);
        self
    }

    /// Build the async storefront on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncShopSphere> {
        tokio::task::spawn_blocking(move || {
            let mut builder = ShopSphere::builder()
                .base_url(self.base_url)
                .in_memory_cart(self.in_memory_cart)
                .timeout(self.timeout)
                .checkout_delay(self.checkout_delay);
            if let Some(dir) = self.storage_dir {
                builder = builder.storage_dir(dir);
            }
            if let Some(api) = self.catalog {
                builder = builder.catalog_api(api);
            }
            if let Some(repo) = self.cart_repository {
                builder = builder.cart_repository(repo);
            }
            let shop = builder.build()?;
            Ok(AsyncShopSphere {
                checkout_delay: shop.checkout_delay(),
                inner: Arc::new(Mutex::new(shop)),
                submitting: Arc::new(AtomicBool::new(false)),
            })
        })
        .await
        .map_err(|e| ShopError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncShopSphere
// ---------------------------------------------------------------------------

/// Async wrapper around [`ShopSphere`].
///
/// The underlying [`ShopSphere`] is protected by a [`Mutex`] since it uses
/// `RefCell` internally. Page controllers borrow the storefront and so are
/// only available through [`run()`](Self::run).
pub struct AsyncShopSphere {
    inner: Arc<Mutex<ShopSphere>>,
    submitting: Arc<AtomicBool>,
    checkout_delay: Duration,
}

impl AsyncShopSphere {
    /// Create a new builder for configuring the async storefront.
    pub fn builder() -> AsyncShopSphereBuilder {
        AsyncShopSphereBuilder::default()
    }

    /// Run a sync storefront operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&ShopSphere) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let shop = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = shop
                .lock()
                .map_err(|_| ShopError::InvalidArgument("storefront lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| ShopError::InvalidArgument(format!("Task join error: {e}")))?
    }

    pub async fn list_products(&self) -> Result<Vec<Product>> {
        self.run(|s| s.list_products()).await
    }

    pub async fn get_product(&self, id: &str) -> Result<Option<Product>> {
        let id = id.to_string();
        self.run(move |s| s.get_product(&id)).await
    }

    pub async fn load_cart(&self) -> Result<Cart> {
        self.run(|s| s.load_cart()).await
    }

    pub async fn add_to_cart(&self, product: Product) -> Result<u32> {
        self.run(move |s| s.add_to_cart(&product)).await
    }

    pub async fn clear_cart(&self) -> Result<()> {
        self.run(|s| s.clear_cart()).await
    }

    /// Whether a checkout is between acceptance and completion.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Mock checkout against the stored cart.
    ///
    /// Refuses a second checkout while one is waiting out its delay.
    pub async fn checkout(&self, form: CheckoutForm) -> Result<Navigation> {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ShopError::CheckoutInProgress);
        }
        let result = self.checkout_inner(form).await;
        self.submitting.store(false, Ordering::SeqCst);
        result
    }

    async fn checkout_inner(&self, form: CheckoutForm) -> Result<Navigation> {
        form.validate()?;
        let cart = self.load_cart().await?;
        if cart.is_empty() {
            return Err(ShopError::EmptyCart);
        }
        let order = OrderData::new(form, &cart);
        info!(items = order.item_count(), total = %order.total_amount, "placing order");

        tokio::time::sleep(self.checkout_delay).await;

        self.clear_cart().await?;
        info!(total = %order.total_amount, "{}", ORDER_PLACED_NOTICE);
        Ok(Navigation::with_order(Route::CheckoutSuccess, order))
    }

    /// Close the storefront, releasing all resources.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || {
            let shop = self
                .inner
                .lock()
                .map_err(|_| ShopError::InvalidArgument("storefront lock poisoned".into()))?;
            drop(shop);
            Ok(())
        })
        .await
        .map_err(|e| ShopError::InvalidArgument(format!("Task join error: {e}")))?
    }
}
