use crate::error::{Result, ShopError};
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

pub const API_BASE: &str = "https://v2.api.noroff.dev";
pub const CATALOG_PATH: &str = "online-shop";

/// Storage key of the persisted cart; the file repository stores it as `cart.json`.
pub const CART_KEY: &str = "cart";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CHECKOUT_DELAY: Duration = Duration::from_secs(2);

pub const PLACEHOLDER_IMAGE_SMALL: &str = "https://via.placeholder.com/100";
pub const PLACEHOLDER_IMAGE_LARGE: &str = "https://via.placeholder.com/300";

pub fn catalog_url(base: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), CATALOG_PATH)
}

/// Catalog URL with `id` appended as a single percent-encoded path segment.
pub fn product_url(base: &str, id: &str) -> Result<Url> {
    let invalid = || ShopError::InvalidArgument(format!("invalid base URL: {base}"));
    let mut url = Url::parse(&catalog_url(base)).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .push(id);
    Ok(url)
}

pub fn default_storage_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("shopsphere")
    } else {
        PathBuf::from(".shopsphere-data")
    }
}
