//! Page controllers.
//!
//! Each page owns its in-memory state and borrows the collaborators it needs
//! from [`ShopSphere`](crate::ShopSphere): the catalog API for fetching and
//! the shared cart repository for persistence. Pages exchange data only
//! through that repository.

pub mod cart;
pub mod catalog;
pub mod product;

pub use cart::{CartPage, PendingCheckout, ORDER_PLACED_NOTICE};
pub use catalog::CatalogPage;
pub use product::{add_to_cart, ProductDetail, ProductPage, ADDED_TO_CART_NOTICE};

use crate::storage::CartRepository;
use std::cell::RefCell;

/// Cart repository shared between pages.
pub type SharedCart = RefCell<Box<dyn CartRepository>>;
