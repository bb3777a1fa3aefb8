//! Storefront routes and navigation results.

use std::fmt;

use crate::models::OrderData;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Product(String),
    Cart,
    CheckoutSuccess,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Product(id) => format!("/product/{id}"),
            Route::Cart => "/cart".to_string(),
            Route::CheckoutSuccess => "/checkout-success".to_string(),
        }
    }

    /// Match a path against the known routes. Trailing slashes and a query
    /// string are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Some(Route::Home),
            ["cart"] => Some(Route::Cart),
            ["checkout-success"] => Some(Route::CheckoutSuccess),
            ["product", id] => Some(Route::Product((*id).to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// A route to move to, plus state that travels with it but is never put in
/// the URL or persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub route: Route,
    pub order: Option<OrderData>,
}

impl Navigation {
    pub fn to(route: Route) -> Self {
        Self { route, order: None }
    }

    pub fn with_order(route: Route, order: OrderData) -> Self {
        Self {
            route,
            order: Some(order),
        }
    }
}
