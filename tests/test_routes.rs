//! Route parsing and path building.

use shopsphere::{Navigation, Route};

#[test]
fn paths_round_trip() {
    for route in [
        Route::Home,
        Route::Cart,
        Route::CheckoutSuccess,
        Route::Product("abc-123".into()),
    ] {
        assert_eq!(Route::parse(&route.path()), Some(route.clone()));
    }
}

#[test]
fn parse_ignores_trailing_slash_and_query() {
    assert_eq!(Route::parse("/cart/"), Some(Route::Cart));
    assert_eq!(
        Route::parse("/product/xyz?ref=home"),
        Some(Route::Product("xyz".into()))
    );
    assert_eq!(Route::parse(""), Some(Route::Home));
}

#[test]
fn parse_rejects_unknown_paths() {
    assert_eq!(Route::parse("/product"), None);
    assert_eq!(Route::parse("/product/a/b"), None);
    assert_eq!(Route::parse("/admin"), None);
}

#[test]
fn plain_navigation_has_no_order() {
    let nav = Navigation::to(Route::Cart);
    assert_eq!(nav.route.to_string(), "/cart");
    assert!(nav.order.is_none());
}
