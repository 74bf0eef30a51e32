//! Cart line item and variant types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Quantity;

/// Color used when the add-to-cart control names none.
pub const DEFAULT_COLOR: &str = "Default";

/// Size used when the add-to-cart control names none.
pub const DEFAULT_SIZE: &str = "M";

/// The (color, size) pair distinguishing otherwise identical products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
    pub color: String,
    pub size: String,
}

impl Variant {
    /// Create a variant, substituting the defaults for missing or empty parts.
    #[must_use]
    pub fn new(color: Option<&str>, size: Option<&str>) -> Self {
        Self {
            color: non_empty(color).unwrap_or(DEFAULT_COLOR).to_string(),
            size: non_empty(size).unwrap_or(DEFAULT_SIZE).to_string(),
        }
    }
}

impl Default for Variant {
    fn default() -> Self {
        Self::new(None, None)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// One distinct product/variant combination in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product display name.
    pub title: String,
    /// Unit price at the time of add.
    pub price: Decimal,
    pub variant: Variant,
    /// Thumbnail URL or path.
    pub image: String,
    quantity: Quantity,
}

impl LineItem {
    /// Create a line item with a quantity of one.
    ///
    /// Negative prices are raised to zero.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        price: Decimal,
        variant: Variant,
        image: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            price: price.max(Decimal::ZERO),
            variant,
            image: image.into(),
            quantity: Quantity::ONE,
        }
    }

    /// Builder-style quantity override.
    #[must_use]
    pub fn with_quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = quantity;
        self
    }

    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub(crate) fn set_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
    }

    /// Unit price times quantity, unrounded. Saturates at `Decimal::MAX`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price
            .checked_mul(Decimal::from(self.quantity.get()))
            .unwrap_or(Decimal::MAX)
    }

    /// Whether `other` names the same (title, color, size) row.
    ///
    /// Comparison is exact: case and whitespace matter.
    #[must_use]
    pub fn same_row(&self, other: &Self) -> bool {
        self.title == other.title && self.variant == other.variant
    }
}
