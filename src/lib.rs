//! ShopSphere storefront SDK.
//!
//! Browses a remote product catalog, shows product details with
//! visitor-submitted star ratings, and keeps a cart in local storage with a
//! mock checkout. Pages are plain controllers rendered to text; the
//! catalog API and the cart store are injectable.
//!
//! # Quick start
//!
//! ```no_run
//! use shopsphere::{CheckoutForm, ShopSphere};
//!
//! let shop = ShopSphere::builder().build().unwrap();
//!
//! // Homepage
//! let mut home = shop.catalog();
//! home.mount();
//! println!("{}", home.render());
//!
//! // Product detail
//! let mut page = shop.product_page();
//! page.navigate("f99cafd2-bd40-4694-8b33-a6052f36b435");
//! page.add_to_cart().unwrap();
//!
//! // Cart and checkout
//! let mut cart = shop.cart_page();
//! cart.mount();
//! let _nav = cart
//!     .checkout(CheckoutForm::new("Ada", "1 Main St", "4111111111111111"))
//!     .unwrap();
//! ```
//!
//! Checkout is simulated. No order or payment data leaves the process.

#[cfg(feature = "async")]
pub mod async_client;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pages;
pub mod render;
pub mod routes;
pub mod state;
pub mod storage;

pub use api::{CatalogApi, HttpCatalogApi};
#[cfg(feature = "async")]
pub use async_client::AsyncShopSphere;
pub use error::{Result, ShopError};
pub use models::{Cart, CartLineItem, CheckoutForm, OrderData, Product, Rating, RatingBook};
pub use pages::{CartPage, CatalogPage, ProductPage};
pub use routes::{Navigation, Route};
pub use state::{LoadFailure, LoadState};
pub use storage::{CartRepository, FileCartRepository, InMemoryCartRepository};

use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use pages::SharedCart;

// ---------------------------------------------------------------------------
// ShopSphereBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`ShopSphere`] instance.
///
/// Use [`ShopSphere::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](ShopSphereBuilder::build).
pub struct ShopSphereBuilder {
    base_url: String,
    storage_dir: Option<PathBuf>,
    in_memory_cart: bool,
    timeout: Duration,
    checkout_delay: Duration,
    catalog: Option<Box<dyn CatalogApi>>,
    cart_repository: Option<Box<dyn CartRepository>>,
}

impl Default for ShopSphereBuilder {
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

impl ShopSphereBuilder {
    /// Set the catalog API base URL. Defaults to [`config::API_BASE`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the directory the cart file is kept in.
    ///
    /// If not set, the platform data directory is used (e.g.
    /// `~/.local/share/shopsphere` on Linux).
    pub fn storage_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Keep the cart in memory only; nothing touches the filesystem.
    pub fn in_memory_cart(mut self, in_memory: bool) -> Self {
        self.in_memory_cart = in_memory;
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the simulated checkout delay. Defaults to 2 seconds.
    pub fn checkout_delay(mut self, delay: Duration) -> Self {
        self.checkout_delay = delay;
        self
    }

    /// Use a custom catalog source instead of the HTTP client.
    pub fn catalog_api(mut self, api: Box<dyn CatalogApi>) -> Self {
        self.catalog = Some(api);
        self
    }

    /// Use a custom cart store. Takes precedence over
    /// [`storage_dir`](Self::storage_dir) and
    /// [`in_memory_cart`](Self::in_memory_cart).
    pub fn cart_repository(mut self, repo: Box<dyn CartRepository>) -> Self {
        self.cart_repository = Some(repo);
        self
    }

    /// Build the storefront. Creates the storage directory when the file
    /// cart is used; does not contact the catalog.
    pub fn build(self) -> Result<ShopSphere> {
        let catalog = match self.catalog {
            Some(api) => api,
            None => Box::new(HttpCatalogApi::new(self.base_url.clone(), self.timeout)?),
        };
        let cart: Box<dyn CartRepository> = match self.cart_repository {
            Some(repo) => repo,
            None if self.in_memory_cart => Box::new(InMemoryCartRepository::new()),
            None => Box::new(FileCartRepository::new(self.storage_dir)?),
        };
        Ok(ShopSphere {
            base_url: self.base_url,
            checkout_delay: self.checkout_delay,
            catalog,
            cart: RefCell::new(cart),
        })
    }
}

// ---------------------------------------------------------------------------
// ShopSphere
// ---------------------------------------------------------------------------

/// The storefront: owns the catalog client and the cart store and hands out
/// page controllers that borrow them.
///
/// Created via [`ShopSphere::builder()`].
pub struct ShopSphere {
    base_url: String,
    checkout_delay: Duration,
    catalog: Box<dyn CatalogApi>,
    cart: SharedCart,
}

impl ShopSphere {
    /// Create a new builder for configuring the storefront.
    pub fn builder() -> ShopSphereBuilder {
        ShopSphereBuilder::default()
    }

    // -- Pages -------------------------------------------------------------

    /// Homepage product grid. Call [`CatalogPage::mount`] to fetch.
    pub fn catalog(&self) -> CatalogPage<'_> {
        CatalogPage::new(self.catalog.as_ref())
    }

    /// Product detail page. Call [`ProductPage::navigate`] with an id.
    pub fn product_page(&self) -> ProductPage<'_> {
        ProductPage::new(self.catalog.as_ref(), &self.cart)
    }

    /// Cart and checkout page. Call [`CartPage::mount`] to read the cart.
    pub fn cart_page(&self) -> CartPage<'_> {
        CartPage::new(&self.cart, self.checkout_delay)
    }

    // -- Direct access -----------------------------------------------------

    /// Fetch every product without going through a page.
    pub fn list_products(&self) -> Result<Vec<Product>> {
        self.catalog.list_products()
    }

    /// Fetch one product without going through a page.
    pub fn get_product(&self, id: &str) -> Result<Option<Product>> {
        self.catalog.get_product(id)
    }

    /// Read the stored cart.
    pub fn load_cart(&self) -> Result<Cart> {
        self.cart.borrow().load()
    }

    /// Add one unit of `product` to the stored cart.
    pub fn add_to_cart(&self, product: &Product) -> Result<u32> {
        let mut repo = self.cart.borrow_mut();
        pages::add_to_cart(&mut **repo, product)
    }

    /// Replace the stored cart.
    pub fn save_cart(&self, cart: &Cart) -> Result<()> {
        self.cart.borrow_mut().save(cart)
    }

    /// Delete the stored cart.
    pub fn clear_cart(&self) -> Result<()> {
        self.cart.borrow_mut().clear()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn checkout_delay(&self) -> Duration {
        self.checkout_delay
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for ShopSphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ShopSphere(base_url={}, checkout_delay={}ms)",
            self.base_url,
            self.checkout_delay.as_millis()
        )
    }
}
