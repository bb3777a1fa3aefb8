use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShopError};

use super::cart::{Cart, CartLineItem};

// ---------------------------------------------------------------------------
// CheckoutForm — Billing fields entered on the cart page
// ---------------------------------------------------------------------------

#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub customer_name: String,
    pub address: String,
    pub credit_card: String,
}

impl CheckoutForm {
    pub fn new(
        customer_name: impl Into<String>,
        address: impl Into<String>,
        credit_card: impl Into<String>,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            address: address.into(),
            credit_card: credit_card.into(),
        }
    }

    /// Every field must be non-blank. The card number is not checked for
    /// format.
    pub fn validate(&self) -> Result<()> {
        if self.customer_name.trim().is_empty() {
            return Err(ShopError::MissingField("customerName"));
        }
        if self.address.trim().is_empty() {
            return Err(ShopError::MissingField("address"));
        }
        if self.credit_card.trim().is_empty() {
            return Err(ShopError::MissingField("creditCard"));
        }
        Ok(())
    }
}

impl fmt::Debug for CheckoutForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutForm")
            .field("customer_name", &self.customer_name)
            .field("address", &self.address)
            .field("credit_card", &mask_card(&self.credit_card))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// OrderData — Snapshot handed to the confirmation view
// ---------------------------------------------------------------------------

/// Order snapshot passed along with the post-checkout navigation.
///
/// Exists only in memory; nothing sends or stores it.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
    pub customer_name: String,
    pub address: String,
    pub credit_card: String,
    pub cart_items: Vec<CartLineItem>,
    pub total_amount: String,
}

impl OrderData {
    pub fn new(form: CheckoutForm, cart: &Cart) -> Self {
        Self {
            customer_name: form.customer_name,
            address: form.address,
            credit_card: form.credit_card,
            cart_items: cart.items().to_vec(),
            total_amount: cart.formatted_total(),
        }
    }

    pub fn item_count(&self) -> u32 {
        self.cart_items.iter().map(|i| i.quantity).sum()
    }
}

impl fmt::Debug for OrderData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderData")
            .field("customer_name", &self.customer_name)
            .field("address", &self.address)
            .field("credit_card", &mask_card(&self.credit_card))
            .field("cart_items", &self.cart_items.len())
            .field("total_amount", &self.total_amount)
            .finish()
    }
}

/// Keep the last four characters of a card number.
pub fn mask_card(card: &str) -> String {
    let chars: Vec<char> = card.chars().filter(|c| !c.is_whitespace()).collect();
    let keep = chars.len().min(4);
    let hidden = chars.len() - keep;
    let tail: String = chars[hidden..].iter().collect();
    format!("{}{}", "*".repeat(hidden), tail)
}
