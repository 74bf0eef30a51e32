//! Add-to-cart trigger elements.

use cart_drawer_core::Variant;
use thiserror::Error;

use super::dom::{COLOR_ATTRIBUTE, PRODUCT_ID_ATTRIBUTE, SIZE_ATTRIBUTE};

/// Errors reading a trigger element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerError {
    /// The element has no usable `data-product-id`.
    #[error("add-to-cart trigger has no data-product-id")]
    MissingProductId,
}

/// What an add-to-cart click asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToCartTrigger {
    /// Sent to the endpoint as-is.
    pub product_id: String,
    /// Local variant; the endpoint knows nothing about it.
    pub variant: Variant,
}

impl AddToCartTrigger {
    #[must_use]
    pub fn new(product_id: impl Into<String>, variant: Variant) -> Self {
        Self {
            product_id: product_id.into(),
            variant,
        }
    }

    /// Read a trigger from an element's attributes.
    ///
    /// `data-color` and `data-size` fall back to `Default` and `M` when
    /// missing or empty.
    ///
    /// # Errors
    ///
    /// Returns `TriggerError::MissingProductId` when `data-product-id` is
    /// missing or blank.
    pub fn from_attributes<'a, I>(attributes: I) -> Result<Self, TriggerError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut product_id = None;
        let mut color = None;
        let mut size = None;

        for (name, value) in attributes {
            match name {
                PRODUCT_ID_ATTRIBUTE => product_id = Some(value),
                COLOR_ATTRIBUTE => color = Some(value),
                SIZE_ATTRIBUTE => size = Some(value),
                _ => {}
            }
        }

        let product_id = product_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(TriggerError::MissingProductId)?;

        Ok(Self::new(product_id, Variant::new(color, size)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_attributes_full() {
        let trigger = AddToCartTrigger::from_attributes([
            ("class", "btn-addtocart js-open-aside"),
            ("data-product-id", "7"),
            ("data-color", "Blue"),
            ("data-size", "L"),
        ])
        .unwrap();
        assert_eq!(trigger.product_id, "7");
        assert_eq!(trigger.variant.color, "Blue");
        assert_eq!(trigger.variant.size, "L");
    }

    #[test]
    fn test_from_attributes_defaults() {
        let trigger =
            AddToCartTrigger::from_attributes([("data-product-id", "7"), ("data-color", "")])
                .unwrap();
        assert_eq!(trigger.variant.color, "Default");
        assert_eq!(trigger.variant.size, "M");
    }

    #[test]
    fn test_from_attributes_missing_id() {
        assert_eq!(
            AddToCartTrigger::from_attributes([("data-color", "Red")]),
            Err(TriggerError::MissingProductId)
        );
        assert_eq!(
            AddToCartTrigger::from_attributes([("data-product-id", "  ")]),
            Err(TriggerError::MissingProductId)
        );
    }
}
