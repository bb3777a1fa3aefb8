//! Remote product catalog access.
//!
//! [`CatalogApi`] is the seam the pages fetch through. [`HttpCatalogApi`] is
//! the real implementation on top of a blocking `reqwest` client; tests swap
//! in a fake.

use crate::config;
use crate::error::{Result, ShopError};
use crate::models::Product;
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Read access to the product catalog.
pub trait CatalogApi: Send {
    /// Fetch every product in the catalog.
    fn list_products(&self) -> Result<Vec<Product>>;

    /// Fetch a single product.
    ///
    /// A successful response without a product body yields `Ok(None)`.
    fn get_product(&self, id: &str) -> Result<Option<Product>>;
}

/// Catalog client for the `/online-shop` endpoints.
pub struct HttpCatalogApi {
    /// Base URL the catalog path is appended to.
    pub base_url: String,
    client: Client,
}

impl HttpCatalogApi {
    /// Create a client for `base_url` with the given request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// GET `url` and parse the body as JSON, mapping non-2xx to
    /// [`ShopError::Status`].
    fn get_json(&self, url: &str) -> Result<Value> {
        debug!(%url, "fetching");
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "catalog request failed");
            return Err(ShopError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(resp.json()?)
    }
}

impl CatalogApi for HttpCatalogApi {
    fn list_products(&self) -> Result<Vec<Product>> {
        let url = config::catalog_url(&self.base_url);
        let body = self.get_json(&url)?;
        let products = parse_product_list(body)?;
        debug!(count = products.len(), "catalog loaded");
        Ok(products)
    }

    fn get_product(&self, id: &str) -> Result<Option<Product>> {
        if id.trim().is_empty() {
            return Err(ShopError::InvalidArgument("product id is empty".into()));
        }
        let url = config::product_url(&self.base_url, id)?;
        let body = self.get_json(url.as_str())?;
        parse_product(body)
    }
}

/// Accept either a bare array or a `{ "data": [...] }` envelope.
pub fn parse_product_list(body: Value) -> Result<Vec<Product>> {
    let arr = match body {
        Value::Array(arr) => arr,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(arr)) => arr,
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                return Err(ShopError::InvalidArgument(format!(
                    "expected product array under \"data\", got {}",
                    json_kind(&other)
                )))
            }
        },
        other => {
            return Err(ShopError::InvalidArgument(format!(
                "expected product array, got {}",
                json_kind(&other)
            )))
        }
    };
    arr.into_iter()
        .map(|v| serde_json::from_value(v).map_err(ShopError::from))
        .collect()
}

/// Unwrap `{ "data": Product }`. A null or absent `data` means not found.
pub fn parse_product(body: Value) -> Result<Option<Product>> {
    let inner = match body {
        Value::Object(mut map) => {
            if map.contains_key("data") {
                map.remove("data").unwrap_or(Value::Null)
            } else if map.contains_key("id") {
                Value::Object(map)
            } else {
                Value::Null
            }
        }
        Value::Null => Value::Null,
        other => {
            return Err(ShopError::InvalidArgument(format!(
                "expected product object, got {}",
                json_kind(&other)
            )))
        }
    };
    match inner {
        Value::Null => Ok(None),
        v => Ok(Some(serde_json::from_value(v)?)),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
