//! Catalog product records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// A product offered by the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    /// Unit price, two decimal places.
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    /// Image URL or path served to the page.
    pub image: String,
    /// Color options shown on the product page. Empty means the default.
    #[serde(default)]
    pub colors: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_product() {
        let json = r#"{"id": 4, "name": "Cap", "price": "299.00", "image": "/media/cap.jpg"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(4));
        assert_eq!(product.price, Decimal::new(29900, 2));
        assert!(product.colors.is_empty());
        assert!(product.category.is_empty());
    }
}
