//! Shared test fixtures for the storefront integration tests.
//!
//! Provides sample catalog products, a scripted [`FakeCatalog`], and
//! `serve()`, a tiny HTTP server on a local port so the real `reqwest`
//! client can be driven without network access.

#![allow(dead_code)]

use shopsphere::{CatalogApi, Product, Result, ShopError, ShopSphere};
use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

pub fn sample_products_json() -> serde_json::Value {
    serde_json::json!([
        {
            "id": "prod-001",
            "title": "Vanilla Perfume",
            "description": "Women's perfume that smells a bit like vanilla.",
            "price": 2599.99,
            "discountedPrice": 2079.99,
            "image": { "url": "https://example.com/perfume.jpg", "alt": "Perfume bottle" },
            "rating": 5,
            "tags": ["perfume", "beauty"],
            "reviews": [
                { "id": "rev-1", "username": "Jo", "rating": 5, "description": "Lovely" },
                { "id": "rev-2", "username": "Sam", "rating": 3, "description": "Fine" }
            ]
        },
        {
            "id": "prod-002",
            "title": "Gold Headphones",
            "description": "Professional headphones with gold trim.",
            "price": 449.99,
            "discountedPrice": 449.99,
            "image": { "url": "https://example.com/headphones.jpg", "alt": "" },
            "rating": 0,
            "tags": ["headphones"],
            "reviews": []
        },
        {
            "id": "prod-003",
            "title": "Toy Car",
            "description": "",
            "price": 100.0,
            "discountedPrice": 75.0,
            "tags": [],
            "reviews": []
        }
    ])
}

pub fn sample_products() -> Vec<Product> {
    serde_json::from_value(sample_products_json()).unwrap()
}

pub fn product(id: &str, price: f64, discounted: f64) -> Product {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": format!("Product {id}"),
        "description": "",
        "price": price,
        "discountedPrice": discounted,
    }))
    .unwrap()
}

// ---------------------------------------------------------------------------
// FakeCatalog
// ---------------------------------------------------------------------------

/// In-process catalog with scripted responses.
#[derive(Default)]
pub struct FakeCatalog {
    pub products: Vec<Product>,
    /// When set, every call fails with this HTTP status.
    pub fail_status: Option<u16>,
    pub calls: Arc<AtomicUsize>,
}

impl FakeCatalog {
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::default()
        }
    }

    fn check(&self, url: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_status {
            Some(status) => Err(ShopError::Status {
                status,
                url: url.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl CatalogApi for FakeCatalog {
    fn list_products(&self) -> Result<Vec<Product>> {
        self.check("fake://online-shop")?;
        Ok(self.products.clone())
    }

    fn get_product(&self, id: &str) -> Result<Option<Product>> {
        self.check(&format!("fake://online-shop/{id}"))?;
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }
}

/// Storefront over a fake catalog, an in-memory cart, and no checkout delay.
pub fn fake_shop(catalog: FakeCatalog) -> ShopSphere {
    ShopSphere::builder()
        .catalog_api(Box::new(catalog))
        .in_memory_cart(true)
        .checkout_delay(Duration::ZERO)
        .build()
        .unwrap()
}

// ---------------------------------------------------------------------------
// Local HTTP server
// ---------------------------------------------------------------------------

/// Serve canned `(status, body)` responses keyed by request path.
///
/// Unknown paths get a 404. Returns the base URL. The server thread runs
/// until the test process exits.
pub fn serve(routes: Vec<(&str, u16, String)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let routes: HashMap<String, (u16, String)> = routes
        .into_iter()
        .map(|(path, status, body)| (path.to_string(), (status, body)))
        .collect();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => buf.extend_from_slice(&chunk[..n]),
                }
            }
            let request = String::from_utf8_lossy(&buf);
            let path = request
                .lines()
                .next()
                .and_then(|line| line.split_whitespace().nth(1))
                .unwrap_or("/")
                .to_string();
            let (status, body) = routes
                .get(&path)
                .cloned()
                .unwrap_or((404, r#"{"errors":[{"message":"No route"}]}"#.to_string()));
            let response = format!(
                "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                reason(status),
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });

    format!("http://{addr}")
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

/// Storefront pointed at a local server, with an in-memory cart.
pub fn http_shop(base_url: &str) -> ShopSphere {
    ShopSphere::builder()
        .base_url(base_url)
        .in_memory_cart(true)
        .timeout(Duration::from_secs(5))
        .checkout_delay(Duration::ZERO)
        .build()
        .unwrap()
}
