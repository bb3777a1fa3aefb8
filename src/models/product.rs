use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ProductImage — Image reference attached to a product
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

// ---------------------------------------------------------------------------
// Review — Customer review as returned by the catalog API
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub username: String,
    /// Whatever the catalog sent; only whole numbers 1..=5 count as ratings.
    #[serde(default)]
    pub rating: serde_json::Value,
    #[serde(default)]
    pub description: String,
}

// ---------------------------------------------------------------------------
// Product — Single catalog entry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub discounted_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ProductImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Product {
    /// Whole-number percentage saved, or `None` when there is no discount.
    ///
    /// A non-positive list price never yields a label.
    pub fn discount_percent(&self) -> Option<i64> {
        if self.price <= 0.0 || self.price == self.discounted_price {
            return None;
        }
        let pct = (self.price - self.discounted_price) / self.price * 100.0;
        Some(pct.round() as i64)
    }

    /// Image URL, or the given placeholder when the product has none.
    pub fn image_url_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.image
            .as_ref()
            .map(|i| i.url.as_str())
            .filter(|u| !u.is_empty())
            .unwrap_or(placeholder)
    }

    /// Alt text, falling back to the title and then a generic label.
    pub fn image_alt(&self) -> &str {
        self.image
            .as_ref()
            .map(|i| i.alt.as_str())
            .filter(|a| !a.is_empty())
            .or_else(|| Some(self.title.as_str()).filter(|t| !t.is_empty()))
            .unwrap_or("Product Image")
    }
}
