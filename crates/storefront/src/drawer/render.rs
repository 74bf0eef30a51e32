//! Projection of the cart onto the drawer panel.

use askama::Template;
use cart_drawer_core::{Cart, CurrencyCode};

/// One rendered cart row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerRow {
    /// Current position in the cart; written to every control's `data-idx`.
    pub index: usize,
    pub title: String,
    pub color: String,
    pub size: String,
    pub image: String,
    pub quantity: u32,
    /// Formatted `price * quantity`.
    pub line_total: String,
}

/// Everything the drawer shows for one cart state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerView {
    pub rows: Vec<DrawerRow>,
    /// Badge text source: sum of all quantities.
    pub item_count: u64,
    /// Formatted subtotal.
    pub subtotal: String,
}

impl DrawerView {
    /// Build the view for the cart's current contents.
    #[must_use]
    pub fn project(cart: &Cart, currency: CurrencyCode) -> Self {
        let rows = cart
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| DrawerRow {
                index,
                title: item.title.clone(),
                color: item.variant.color.clone(),
                size: item.variant.size.clone(),
                image: item.image.clone(),
                quantity: item.quantity().get(),
                line_total: currency.format(item.line_total()),
            })
            .collect();

        let totals = cart.totals();
        Self {
            rows,
            item_count: totals.quantity,
            subtotal: currency.format(totals.subtotal),
        }
    }

    /// Row list markup for `#cart-items`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn items_markup(&self) -> askama::Result<String> {
        DrawerItemsTemplate { view: self }.render()
    }
}

/// Cart rows fragment.
#[derive(Template)]
#[template(path = "partials/cart_drawer_items.html")]
pub struct DrawerItemsTemplate<'a> {
    pub view: &'a DrawerView,
}
