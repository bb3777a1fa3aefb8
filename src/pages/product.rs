//! Product detail page with local ratings and add-to-cart.

use tracing::{debug, info, warn};

use crate::api::CatalogApi;
use crate::error::{Result, ShopError};
use crate::models::{Product, Rating, RatingBook};
use crate::render;
use crate::state::{LoadFailure, LoadState, LoadTicket, RequestTracker};
use crate::storage::CartRepository;

use super::SharedCart;

pub const ADDED_TO_CART_NOTICE: &str = "Product added to cart!";

/// A loaded product together with the ratings shown for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    pub product: Product,
    pub ratings: RatingBook,
}

impl ProductDetail {
    pub fn new(product: Product) -> Self {
        let ratings = RatingBook::from_reviews(&product.reviews);
        Self { product, ratings }
    }
}

/// Add one unit of `product` to the stored cart.
///
/// Loads the cart, bumps or appends the line, and writes the whole array
/// back. Returns the line's new quantity.
pub fn add_to_cart(repo: &mut dyn CartRepository, product: &Product) -> Result<u32> {
    let mut cart = repo.load()?;
    let quantity = cart.add(product.clone());
    repo.save(&cart)?;
    info!(product = %product.id, quantity, "added to cart");
    Ok(quantity)
}

/// Detail view for the product named by the current route.
pub struct ProductPage<'a> {
    api: &'a dyn CatalogApi,
    cart: &'a SharedCart,
    tracker: RequestTracker,
    product_id: Option<String>,
    state: LoadState<ProductDetail>,
}

impl<'a> ProductPage<'a> {
    pub fn new(api: &'a dyn CatalogApi, cart: &'a SharedCart) -> Self {
        Self {
            api,
            cart,
            tracker: RequestTracker::new(),
            product_id: None,
            state: LoadState::Loading,
        }
    }

    /// Load the product with `id`, replacing whatever was shown.
    ///
    /// Called on mount and whenever the route's id changes.
    pub fn navigate(&mut self, id: &str) -> &LoadState<ProductDetail> {
        let ticket = self.begin_load(id);
        let result = self.api.get_product(id);
        self.finish_load(&ticket, result);
        &self.state
    }

    /// Start a load for `id`. Any earlier ticket becomes stale.
    pub fn begin_load(&mut self, id: &str) -> LoadTicket {
        let ticket = self.tracker.begin(id);
        debug!(product = id, generation = ticket.generation, "loading product");
        self.product_id = Some(id.to_string());
        self.state = LoadState::Loading;
        ticket
    }

    /// Apply the response for `ticket`.
    ///
    /// Returns `false` and leaves the page alone if a newer load has started
    /// since the ticket was issued.
    pub fn finish_load(&mut self, ticket: &LoadTicket, result: Result<Option<Product>>) -> bool {
        if !self.tracker.is_current(ticket) {
            debug!(
                product = %ticket.key,
                generation = ticket.generation,
                latest = self.tracker.current(),
                "discarding stale product response"
            );
            return false;
        }
        self.state = match result {
            Ok(Some(product)) => LoadState::Ready(ProductDetail::new(product)),
            Ok(None) => {
                warn!(product = %ticket.key, "product not found");
                LoadState::Error(LoadFailure::NotFound)
            }
            Err(e) => {
                warn!(product = %ticket.key, error = %e, "product failed to load");
                LoadState::Error(LoadFailure::from(&e))
            }
        };
        true
    }

    pub fn product_id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }

    pub fn state(&self) -> &LoadState<ProductDetail> {
        &self.state
    }

    pub fn product(&self) -> Option<&Product> {
        self.state.ready().map(|d| &d.product)
    }

    /// Record a visitor rating.
    ///
    /// Values outside 1..=5 are rejected with [`ShopError::InvalidRating`]
    /// and leave the ratings untouched.
    pub fn submit_rating(&mut self, value: i64) -> Result<Rating> {
        let detail = self
            .state
            .ready_mut()
            .ok_or_else(|| ShopError::InvalidArgument("no product loaded".into()))?;
        let rating = detail.ratings.submit(value)?;
        debug!(product = %detail.product.id, rating = rating.value(), "rating submitted");
        Ok(rating)
    }

    pub fn ratings(&self) -> Option<&RatingBook> {
        self.state.ready().map(|d| &d.ratings)
    }

    pub fn average_rating(&self) -> Option<f64> {
        self.ratings().and_then(RatingBook::average)
    }

    /// Average as displayed, "No ratings yet" when there is nothing to
    /// average.
    pub fn average_label(&self) -> String {
        self.ratings()
            .map(RatingBook::average_label)
            .unwrap_or_else(|| RatingBook::new().average_label())
    }

    /// Put the shown product in the shared cart.
    pub fn add_to_cart(&self) -> Result<&'static str> {
        let product = self
            .product()
            .ok_or_else(|| ShopError::InvalidArgument("no product loaded".into()))?;
        let mut repo = self.cart.borrow_mut();
        add_to_cart(&mut **repo, product)?;
        Ok(ADDED_TO_CART_NOTICE)
    }

    pub fn render(&self) -> String {
        render::product(&self.state)
    }
}
