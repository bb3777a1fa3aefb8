//! Browse the live catalog, put the first product in the cart, and run the
//! mock checkout, printing each page as it would be shown.
//!
//! ```sh
//! RUST_LOG=shopsphere=debug cargo run
//! ```

use std::process::ExitCode;

use shopsphere::{render, CheckoutForm, LoadState, ShopSphere};
use tracing::{error, info};

fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

fn main() -> ExitCode {
    setup_tracing();

    let shop = match ShopSphere::builder().in_memory_cart(true).build() {
        Ok(shop) => shop,
        Err(e) => {
            error!(error = %e, "failed to initialize storefront");
            return ExitCode::FAILURE;
        }
    };
    info!("{shop}");

    let mut home = shop.catalog();
    home.mount();
    println!("{}", home.render());

    let Some(first) = home.products().first() else {
        return match home.state() {
            LoadState::Error(_) => ExitCode::FAILURE,
            _ => ExitCode::SUCCESS,
        };
    };
    let nav = home.view_product(&first.id);
    println!("\n--> {}\n", nav.route);

    let mut detail = shop.product_page();
    detail.navigate(&first.id);
    if let Err(e) = detail.submit_rating(5) {
        println!("{e}");
    }
    println!("{}", detail.render());
    match detail.add_to_cart() {
        Ok(notice) => println!("{notice}"),
        Err(e) => {
            error!(error = %e, "add to cart failed");
            return ExitCode::FAILURE;
        }
    }

    let mut cart = shop.cart_page();
    cart.mount();
    println!("\n{}", cart.render());

    match cart.checkout(CheckoutForm::new("Demo Customer", "1 Example Street", "4242424242424242")) {
        Ok(nav) => {
            println!("\n--> {}\n", nav.route);
            if let Some(order) = nav.order {
                println!("{}", render::confirmation(&order));
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "checkout failed");
            ExitCode::FAILURE
        }
    }
}
