//! Cart page with quantity editing and the mock checkout.
//!
//! Checkout never talks to a payment provider. It waits a fixed delay,
//! clears the cart, and hands the order snapshot to the confirmation route.

use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::{Result, ShopError};
use crate::models::{parse_quantity, Cart, CheckoutForm, OrderData};
use crate::render;
use crate::routes::{Navigation, Route};

use super::SharedCart;

pub const ORDER_PLACED_NOTICE: &str = "Order placed successfully!";

/// An accepted checkout waiting for its simulated delay to elapse.
///
/// Holds the page's checkout lock. Dropping it without calling
/// [`CartPage::complete_checkout`] re-enables checkout and leaves the cart
/// untouched.
#[derive(Debug)]
pub struct PendingCheckout {
    order: OrderData,
    submitting: Rc<Cell<bool>>,
}

impl PendingCheckout {
    pub fn order(&self) -> &OrderData {
        &self.order
    }
}

impl Drop for PendingCheckout {
    fn drop(&mut self) {
        self.submitting.set(false);
    }
}

/// Cart view over the shared repository.
pub struct CartPage<'a> {
    repo: &'a SharedCart,
    cart: Cart,
    submitting: Rc<Cell<bool>>,
    checkout_delay: Duration,
}

impl<'a> CartPage<'a> {
    pub fn new(repo: &'a SharedCart, checkout_delay: Duration) -> Self {
        Self {
            repo,
            cart: Cart::new(),
            submitting: Rc::new(Cell::new(false)),
            checkout_delay,
        }
    }

    /// Read the stored cart. Any storage failure shows an empty cart.
    pub fn mount(&mut self) -> &Cart {
        self.cart = match self.repo.borrow().load() {
            Ok(cart) => cart,
            Err(e) => {
                warn!(error = %e, "could not read stored cart; showing an empty cart");
                Cart::new()
            }
        };
        &self.cart
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Save `next` and adopt it as the page's cart once the write succeeds.
    fn commit(&mut self, next: Cart) -> Result<()> {
        self.repo.borrow_mut().save(&next)?;
        self.cart = next;
        Ok(())
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let mut next = self.cart.clone();
        if !next.remove(id) {
            return Ok(false);
        }
        self.commit(next)?;
        info!(product = id, "removed from cart");
        Ok(true)
    }

    /// Set the quantity for `id`, clamped to at least 1.
    pub fn change_quantity(&mut self, id: &str, quantity: u32) -> Result<Option<u32>> {
        let mut next = self.cart.clone();
        let Some(stored) = next.set_quantity(id, quantity) else {
            return Ok(None);
        };
        self.commit(next)?;
        info!(product = id, quantity = stored, "quantity changed");
        Ok(Some(stored))
    }

    /// Set the quantity from raw editor text.
    pub fn change_quantity_input(&mut self, id: &str, raw: &str) -> Result<Option<u32>> {
        self.change_quantity(id, parse_quantity(raw))
    }

    pub fn total(&self) -> f64 {
        self.cart.total()
    }

    pub fn formatted_total(&self) -> String {
        self.cart.formatted_total()
    }

    /// Whether the checkout action is currently disabled.
    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    /// Validate the form, snapshot the order, and lock the checkout action.
    pub fn begin_checkout(&mut self, form: CheckoutForm) -> Result<PendingCheckout> {
        if self.submitting.get() {
            return Err(ShopError::CheckoutInProgress);
        }
        if self.cart.is_empty() {
            return Err(ShopError::EmptyCart);
        }
        form.validate()?;
        self.submitting.set(true);
        let order = OrderData::new(form, &self.cart);
        info!(
            items = order.item_count(),
            total = %order.total_amount,
            "placing order"
        );
        Ok(PendingCheckout {
            order,
            submitting: Rc::clone(&self.submitting),
        })
    }

    /// Clear the cart and move to the confirmation route.
    ///
    /// The checkout lock is released whether or not clearing succeeds.
    pub fn complete_checkout(&mut self, pending: PendingCheckout) -> Result<Navigation> {
        let cleared = self.repo.borrow_mut().clear();
        let order = pending.order.clone();
        drop(pending);
        cleared?;
        self.cart.clear();
        info!(total = %order.total_amount, "{}", ORDER_PLACED_NOTICE);
        Ok(Navigation::with_order(Route::CheckoutSuccess, order))
    }

    /// Abandon an accepted checkout. The cart is kept and checkout is
    /// enabled again.
    pub fn cancel_checkout(&mut self, pending: PendingCheckout) {
        info!(items = pending.order.item_count(), "checkout cancelled");
        drop(pending);
    }

    /// Run the whole mock checkout, blocking for the configured delay.
    pub fn checkout(&mut self, form: CheckoutForm) -> Result<Navigation> {
        let pending = self.begin_checkout(form)?;
        thread::sleep(self.checkout_delay);
        self.complete_checkout(pending)
    }

    pub fn render(&self) -> String {
        render::cart(&self.cart, self.submitting.get())
    }
}
