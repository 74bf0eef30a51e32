//! Element ids, class names and attributes the drawer reads from events
//! and trigger elements.
//!
//! The same strings are written out by `templates/partials/cart_drawer*.html`
//! and the add-to-cart buttons; changing one means changing both.

/// Button inside the panel that closes it.
pub const CLOSE_BUTTON_ID: &str = "close-cart-btn";
/// Page-dimming overlay; clicking it closes the drawer.
pub const OVERLAY_ID: &str = "page-overlay";

/// Row control: add one.
pub const INCREASE_CLASS: &str = "qty-control__increase";
/// Row control: subtract one.
pub const REDUCE_CLASS: &str = "qty-control__reduce";
/// Row control: numeric quantity input.
pub const QUANTITY_INPUT_CLASS: &str = "qty-control__number";
/// Row control: remove the row.
pub const REMOVE_CLASS: &str = "js-cart-item-remove";

pub const PRODUCT_ID_ATTRIBUTE: &str = "data-product-id";
pub const COLOR_ATTRIBUTE: &str = "data-color";
pub const SIZE_ATTRIBUTE: &str = "data-size";

/// Whether a space-separated class list contains `class`.
#[must_use]
pub fn has_class(class_list: &str, class: &str) -> bool {
    class_list.split_whitespace().any(|c| c == class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_class() {
        assert!(has_class("btn qty-control__increase", INCREASE_CLASS));
        assert!(!has_class("qty-control__increase-big", INCREASE_CLASS));
        assert!(!has_class("", INCREASE_CLASS));
    }
}
