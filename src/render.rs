//! Plain-text rendering of each page.
//!
//! Every renderer takes the page's [`LoadState`] (or cart) and produces the
//! text a user would see. Layout and styling are not modelled.

use std::fmt::Write;

use crate::config::{PLACEHOLDER_IMAGE_LARGE, PLACEHOLDER_IMAGE_SMALL};
use crate::models::{Cart, OrderData, Product};
use crate::pages::ProductDetail;
use crate::routes::Route;
use crate::state::{LoadFailure, LoadState};

pub const STORE_NAME: &str = "ShopSphere";
pub const EMPTY_CATALOG: &str = "No products available.";
pub const PRODUCT_NOT_FOUND: &str = "Product not found.";
pub const EMPTY_CART: &str = "Your cart is empty.";

fn failure_line(failure: &LoadFailure) -> String {
    match failure {
        LoadFailure::NotFound => PRODUCT_NOT_FOUND.to_string(),
        LoadFailure::Failed(msg) => format!("Error: {msg}"),
    }
}

fn price_line(product: &Product) -> String {
    let mut line = format!("Price: ${:.2}", product.discounted_price);
    if let Some(pct) = product.discount_percent() {
        let _ = write!(line, " ({pct}% off)");
    }
    line
}

pub fn catalog(state: &LoadState<Vec<Product>>) -> String {
    let products = match state {
        LoadState::Loading => return "Loading products...".to_string(),
        LoadState::Error(failure) => return failure_line(failure),
        LoadState::Ready(products) => products,
    };

    let mut out = format!("{STORE_NAME}\n");
    if products.is_empty() {
        out.push_str(EMPTY_CATALOG);
        out.push('\n');
        return out;
    }
    for product in products {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", product.title);
        let _ = writeln!(
            out,
            "  [image] {} ({})",
            product.image_url_or(PLACEHOLDER_IMAGE_LARGE),
            product.image_alt()
        );
        let _ = writeln!(out, "  {}", price_line(product));
        let _ = writeln!(
            out,
            "  [View Product] -> {}",
            Route::Product(product.id.clone())
        );
    }
    out
}

pub fn product(state: &LoadState<ProductDetail>) -> String {
    let detail = match state {
        LoadState::Loading => return "Loading product details...".to_string(),
        LoadState::Error(failure) => return failure_line(failure),
        LoadState::Ready(detail) => detail,
    };
    let product = &detail.product;

    let mut out = String::new();
    let _ = writeln!(out, "{}", product.title);
    let _ = writeln!(
        out,
        "[image] {} ({})",
        product.image_url_or(PLACEHOLDER_IMAGE_LARGE),
        product.image_alt()
    );
    let _ = writeln!(out, "Price: ${:.2}", product.discounted_price);
    if let Some(pct) = product.discount_percent() {
        let _ = writeln!(out, "Discount: {pct}% off");
    }
    if product.description.is_empty() {
        out.push_str("No description available.\n");
    } else {
        let _ = writeln!(out, "{}", product.description);
    }
    out.push_str("[Buy Now]\n\n");

    let _ = writeln!(out, "Average Rating: {}", detail.ratings.average_label());
    out.push_str("Your Rating (1-5): [Submit]\n");
    if !detail.ratings.is_empty() {
        out.push_str("\nCustomer Ratings:\n");
        for rating in detail.ratings.ratings() {
            let _ = writeln!(out, "  Rating: {} \u{2b50}", rating.value());
        }
    }
    out
}

pub fn cart(cart: &Cart, submitting: bool) -> String {
    let mut out = String::from("Your Cart\n");
    if cart.is_empty() {
        out.push_str(EMPTY_CART);
        out.push('\n');
        return out;
    }
    for item in cart.items() {
        let product = &item.product;
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", product.title);
        let _ = writeln!(out, "  [image] {}", product.image_url_or(PLACEHOLDER_IMAGE_SMALL));
        if !product.description.is_empty() {
            let _ = writeln!(out, "  {}", product.description);
        }
        let _ = writeln!(out, "  Price: ${:.2}", product.discounted_price);
        let _ = writeln!(out, "  Quantity: {}", item.quantity);
        out.push_str("  [Remove]\n");
    }
    let _ = writeln!(out, "\nTotal: ${}", cart.formatted_total());
    out.push_str("\nBilling Information\n");
    let label = if submitting {
        "Processing..."
    } else {
        "Complete Purchase"
    };
    let _ = writeln!(out, "[{label}]");
    out
}

pub fn confirmation(order: &OrderData) -> String {
    let mut out = String::from("Order placed successfully!\n");
    let _ = writeln!(out, "Thank you, {}.", order.customer_name);
    let _ = writeln!(out, "Shipping to: {}", order.address);
    for item in &order.cart_items {
        let _ = writeln!(out, "  {} x{}", item.product.title, item.quantity);
    }
    let _ = writeln!(out, "Total: ${}", order.total_amount);
    out
}
