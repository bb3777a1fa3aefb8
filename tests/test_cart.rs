//! Cart model tests: adding, removing, quantities, and totals.

mod common;

use shopsphere::models::parse_quantity;
use shopsphere::{Cart, CartLineItem};

fn cart_of(entries: &[(&str, f64, u32)]) -> Cart {
    let items = entries
        .iter()
        .map(|(id, price, qty)| CartLineItem {
            product: common::product(id, *price, *price),
            quantity: *qty,
        })
        .collect::<Vec<_>>();
    Cart::from(items)
}

fn ids(cart: &Cart) -> Vec<&str> {
    cart.items().iter().map(|i| i.id()).collect()
}

// ---------------------------------------------------------------------------
// add
// ---------------------------------------------------------------------------

#[test]
fn add_new_product_appends_quantity_one() {
    let mut cart = Cart::new();
    assert_eq!(cart.add(common::product("a", 10.0, 8.0)), 1);
    assert_eq!(cart.add(common::product("b", 5.0, 5.0)), 1);

    assert_eq!(ids(&cart), vec!["a", "b"]);
    assert!(cart.items().iter().all(|i| i.quantity == 1));
}

#[test]
fn add_existing_product_increments_without_duplicating() {
    let mut cart = Cart::new();
    cart.add(common::product("a", 10.0, 8.0));
    cart.add(common::product("b", 5.0, 5.0));

    assert_eq!(cart.add(common::product("a", 10.0, 8.0)), 2);
    assert_eq!(cart.len(), 2);
    assert_eq!(cart.get("a").unwrap().quantity, 2);
    assert_eq!(cart.get("b").unwrap().quantity, 1);
}

#[test]
fn add_keeps_the_first_snapshot() {
    let mut cart = Cart::new();
    cart.add(common::product("a", 10.0, 8.0));
    cart.add(common::product("a", 12.0, 11.0));

    assert_eq!(cart.get("a").unwrap().product.discounted_price, 8.0);
}

// ---------------------------------------------------------------------------
// remove
// ---------------------------------------------------------------------------

#[test]
fn remove_keeps_other_items_in_order() {
    let mut cart = cart_of(&[("a", 1.0, 1), ("b", 2.0, 1), ("c", 3.0, 2)]);

    assert!(cart.remove("b"));
    assert_eq!(ids(&cart), vec!["a", "c"]);
}

#[test]
fn remove_unknown_id_is_a_no_op() {
    let mut cart = cart_of(&[("a", 1.0, 1)]);

    assert!(!cart.remove("zzz"));
    assert_eq!(ids(&cart), vec!["a"]);
}

// ---------------------------------------------------------------------------
// set_quantity
// ---------------------------------------------------------------------------

#[test]
fn set_quantity_replaces_value() {
    let mut cart = cart_of(&[("a", 1.0, 1)]);

    assert_eq!(cart.set_quantity("a", 7), Some(7));
    assert_eq!(cart.get("a").unwrap().quantity, 7);
}

#[test]
fn set_quantity_clamps_zero_to_one() {
    let mut cart = cart_of(&[("a", 1.0, 3)]);

    assert_eq!(cart.set_quantity("a", 0), Some(1));
}

#[test]
fn set_quantity_unknown_id_returns_none() {
    let mut cart = cart_of(&[("a", 1.0, 3)]);

    assert_eq!(cart.set_quantity("b", 2), None);
    assert_eq!(cart.get("a").unwrap().quantity, 3);
}

#[test]
fn parse_quantity_handles_editor_input() {
    assert_eq!(parse_quantity("3"), 3);
    assert_eq!(parse_quantity(" 12 "), 12);
    assert_eq!(parse_quantity("2.9"), 2);
    assert_eq!(parse_quantity("0"), 1);
    assert_eq!(parse_quantity("-4"), 1);
    assert_eq!(parse_quantity(""), 1);
    assert_eq!(parse_quantity("abc"), 1);
    assert_eq!(parse_quantity("NaN"), 1);
    assert_eq!(parse_quantity("inf"), 1);
}

// ---------------------------------------------------------------------------
// total
// ---------------------------------------------------------------------------

#[test]
fn total_sums_discounted_price_times_quantity() {
    let mut cart = Cart::new();
    cart.add(common::product("a", 20.0, 19.99));
    cart.add(common::product("b", 5.0, 0.1));
    cart.set_quantity("a", 3);
    cart.set_quantity("b", 3);

    // 59.97 + 0.30
    assert_eq!(cart.total(), 60.27);
    assert_eq!(cart.formatted_total(), "60.27");
}

#[test]
fn total_ignores_list_price() {
    let mut cart = Cart::new();
    cart.add(common::product("a", 100.0, 75.0));
    cart.add(common::product("a", 100.0, 75.0));

    assert_eq!(cart.formatted_total(), "150.00");
}

#[test]
fn empty_cart_total_is_zero() {
    let cart = Cart::new();
    assert_eq!(cart.total(), 0.0);
    assert_eq!(cart.formatted_total(), "0.00");
}

#[test]
fn emptied_cart_total_is_unsigned_zero() {
    let mut cart = Cart::new();
    cart.add(common::product("a", 3.0, 3.0));
    assert!(cart.remove("a"));
    assert!(cart.total().is_sign_positive());
    assert_eq!(cart.formatted_total(), "0.00");
}

// ---------------------------------------------------------------------------
// serialization
// ---------------------------------------------------------------------------

#[test]
fn line_items_serialize_flat_with_quantity() {
    let mut cart = Cart::new();
    cart.add(common::product("a", 10.0, 8.0));

    let json = serde_json::to_value(&cart).unwrap();
    let first = &json.as_array().unwrap()[0];
    assert_eq!(first["id"], "a");
    assert_eq!(first["discountedPrice"], 8.0);
    assert_eq!(first["quantity"], 1);
}

#[test]
fn stored_line_items_with_extra_fields_parse() {
    let raw = serde_json::json!([{
        "id": "x",
        "title": "Thing",
        "price": 3.0,
        "discountedPrice": 2.5,
        "image": { "url": "u", "alt": "a" },
        "somethingNew": true,
        "quantity": 4
    }]);
    let cart: Cart = serde_json::from_value(raw).unwrap();

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.get("x").unwrap().quantity, 4);
    assert_eq!(cart.formatted_total(), "10.00");
}
