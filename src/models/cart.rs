use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::product::Product;

// ---------------------------------------------------------------------------
// CartLineItem — Product snapshot plus purchase quantity
// ---------------------------------------------------------------------------

/// Serialized flat, so a stored line item is the product record with an
/// extra `quantity` field.
///
/// A stored quantity is coerced the same way editor input is: fractions
/// truncate, and anything missing, non-numeric, or below 1 becomes 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(flatten)]
    pub product: Product,
    #[serde(default = "default_quantity", deserialize_with = "deserialize_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

fn deserialize_quantity<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().map(coerce_quantity).unwrap_or(1),
        Value::String(s) => parse_quantity(&s),
        _ => 1,
    })
}

impl CartLineItem {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    pub fn id(&self) -> &str {
        &self.product.id
    }

    pub fn subtotal(&self) -> f64 {
        self.product.discounted_price * f64::from(self.quantity)
    }
}

// ---------------------------------------------------------------------------
// Cart — Ordered line items keyed by product id
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Add one unit of `product`.
    ///
    /// Bumps the existing line for the same id, otherwise appends a new
    /// quantity-1 line. Returns the resulting quantity.
    pub fn add(&mut self, product: Product) -> u32 {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity = item.quantity.saturating_add(1);
            return item.quantity;
        }
        self.items.push(CartLineItem::new(product));
        1
    }

    /// Drop the line with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }

    /// Replace the quantity of the line with `id`, clamped to at least 1.
    ///
    /// Returns the stored quantity, or `None` if no such line exists.
    pub fn set_quantity(&mut self, id: &str, quantity: u32) -> Option<u32> {
        let item = self.items.iter_mut().find(|i| i.product.id == id)?;
        item.quantity = quantity.max(1);
        Some(item.quantity)
    }

    /// Sum of discounted price times quantity, rounded to cents.
    pub fn total(&self) -> f64 {
        // `Sum for f64` starts from -0.0, which would print as "-0.00".
        let raw = self
            .items
            .iter()
            .map(CartLineItem::subtotal)
            .fold(0.0, |acc, s| acc + s);
        (raw * 100.0).round() / 100.0
    }

    pub fn formatted_total(&self) -> String {
        format!("{:.2}", self.total())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl From<Vec<CartLineItem>> for Cart {
    fn from(items: Vec<CartLineItem>) -> Self {
        Self { items }
    }
}

/// Parse a quantity typed into the cart editor.
///
/// Non-numeric, non-finite, or sub-1 input becomes 1; fractions truncate.
pub fn parse_quantity(raw: &str) -> u32 {
    raw.trim().parse::<f64>().map(coerce_quantity).unwrap_or(1)
}

/// Truncate a numeric quantity and clamp it to at least 1.
pub fn coerce_quantity(v: f64) -> u32 {
    if !v.is_finite() || v < 1.0 {
        1
    } else if v >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        v.trunc() as u32
    }
}
