//! JSON reply of the add-to-cart endpoint.
//!
//! ```text
//! { "success": true,  "name": "Shirt", "price": "20.00", "img": "/media/shirt.jpg" }
//! { "success": false, "error": "Product not found" }
//! ```
//!
//! The storefront always sends the price as a string; readers also accept a
//! JSON number.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::Product;

/// A price as it appears on the wire: a decimal string or a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WirePrice {
    Text(String),
    Number(serde_json::Number),
}

impl WirePrice {
    /// The price as a decimal, if it is one.
    #[must_use]
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Text(text) => Decimal::from_str(text.trim()).ok(),
            Self::Number(number) => Decimal::from_str(&number.to_string())
                .or_else(|_| Decimal::from_scientific(&number.to_string()))
                .ok(),
        }
    }
}

/// Body of an add-to-cart reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddToCartReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<WirePrice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AddToCartReply {
    /// A successful reply describing `product`.
    #[must_use]
    pub fn added(product: &Product) -> Self {
        Self {
            success: true,
            name: Some(product.name.clone()),
            price: Some(WirePrice::Text(product.price.to_string())),
            img: Some(product.image.clone()),
            error: None,
        }
    }

    /// A rejection carrying a reason.
    #[must_use]
    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            name: None,
            price: None,
            img: None,
            error: Some(error.into()),
        }
    }
}
