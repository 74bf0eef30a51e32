//! The cart store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::LineItem;
use crate::types::{Quantity, parse_quantity};

/// Errors returned by index-addressed cart operations.
///
/// These never leave the cart in a changed state.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The index does not address a row.
    #[error("no cart row at index {index} (cart has {len} rows)")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of rows at the time of the request.
        len: usize,
    },
}

/// Aggregates shown alongside the cart rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    /// Sum of all row quantities.
    pub quantity: u64,
    /// Sum of `price * quantity` over all rows, unrounded.
    pub subtotal: Decimal,
}

/// An ordered list of line items, at most one per (title, color, size).
///
/// Insertion order is preserved. Rows are addressed by their current
/// position, which shifts down after a removal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Rows in display order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a line item, merging it into an existing row with the same
    /// (title, color, size).
    ///
    /// A merge adds the candidate's quantity to the existing row; the
    /// existing row keeps its price and image. Returns the index of the row
    /// that now holds the item.
    pub fn add_or_increment(&mut self, item: LineItem) -> usize {
        if let Some((index, existing)) = self
            .items
            .iter_mut()
            .enumerate()
            .find(|(_, existing)| existing.same_row(&item))
        {
            let quantity = existing.quantity().saturating_add(item.quantity());
            existing.set_quantity(quantity);
            return index;
        }

        self.items.push(item);
        self.items.len() - 1
    }

    /// Add one to the row's quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::IndexOutOfRange` if `index` addresses no row.
    pub fn increment(&mut self, index: usize) -> Result<Quantity, CartError> {
        let item = self.item_mut(index)?;
        let quantity = item.quantity().saturating_add(Quantity::ONE);
        item.set_quantity(quantity);
        Ok(quantity)
    }

    /// Subtract one from the row's quantity unless it is already 1.
    ///
    /// Returns whether the quantity changed. A row at quantity 1 stays in
    /// the cart; only [`Cart::remove`] takes rows out.
    ///
    /// # Errors
    ///
    /// Returns `CartError::IndexOutOfRange` if `index` addresses no row.
    pub fn decrement(&mut self, index: usize) -> Result<bool, CartError> {
        let item = self.item_mut(index)?;
        match item.quantity().checked_decrement() {
            Some(quantity) => {
                item.set_quantity(quantity);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Overwrite the row's quantity with a value typed by the user.
    ///
    /// Unparsable or non-positive input becomes 1. Returns the stored value.
    ///
    /// # Errors
    ///
    /// Returns `CartError::IndexOutOfRange` if `index` addresses no row.
    pub fn set_quantity(&mut self, index: usize, value: &str) -> Result<Quantity, CartError> {
        let item = self.item_mut(index)?;
        let quantity = parse_quantity(value);
        item.set_quantity(quantity);
        Ok(quantity)
    }

    /// Remove the row, shifting later rows down by one.
    ///
    /// # Errors
    ///
    /// Returns `CartError::IndexOutOfRange` if `index` addresses no row.
    pub fn remove(&mut self, index: usize) -> Result<LineItem, CartError> {
        if index >= self.items.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.items.remove(index))
    }

    /// Aggregate quantity and subtotal over all rows.
    ///
    /// Both sums saturate rather than overflow; the subtotal caps at
    /// `Decimal::MAX`.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.items
            .iter()
            .fold(CartTotals::default(), |totals, item| CartTotals {
                quantity: totals
                    .quantity
                    .saturating_add(u64::from(item.quantity().get())),
                subtotal: totals
                    .subtotal
                    .checked_add(item.line_total())
                    .unwrap_or(Decimal::MAX),
            })
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut LineItem, CartError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(CartError::IndexOutOfRange { index, len })
    }

    const fn out_of_range(&self, index: usize) -> CartError {
        CartError::IndexOutOfRange {
            index,
            len: self.items.len(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::cart::Variant;

    fn shirt(color: &str) -> LineItem {
        LineItem::new(
            "Shirt",
            Decimal::from(20),
            Variant::new(Some(color), Some("M")),
            "/media/shirt.jpg",
        )
    }

    #[test]
    fn test_duplicate_add_increments() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_or_increment(shirt("Red")), 0);
        assert_eq!(cart.add_or_increment(shirt("Red")), 0);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity().get(), 2);
        assert_eq!(cart.totals().subtotal, Decimal::from(40));
    }

    #[test]
    fn test_duplicate_add_uses_candidate_quantity() {
        let mut cart = Cart::new();
        cart.add_or_increment(shirt("Red"));
        cart.add_or_increment(shirt("Red").with_quantity(Quantity::clamped(3)));
        assert_eq!(cart.items()[0].quantity().get(), 4);
    }

    #[test]
    fn test_different_variant_appends() {
        let mut cart = Cart::new();
        cart.add_or_increment(shirt("Red"));
        assert_eq!(cart.add_or_increment(shirt("Blue")), 1);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.totals().quantity, 2);
        assert_eq!(cart.items()[1].variant.color, "Blue");
    }

    #[test]
    fn test_merge_keeps_first_price() {
        let mut cart = Cart::new();
        cart.add_or_increment(shirt("Red"));
        let mut repriced = shirt("Red");
        repriced.price = Decimal::from(25);
        cart.add_or_increment(repriced);
        assert_eq!(cart.items()[0].price, Decimal::from(20));
        assert_eq!(cart.totals().subtotal, Decimal::from(40));
    }

    #[test]
    fn test_decrement_at_one_is_noop() {
        let mut cart = Cart::new();
        cart.add_or_increment(shirt("Red"));
        assert_eq!(cart.decrement(0), Ok(false));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity(), Quantity::ONE);
    }

    #[test]
    fn test_increment_then_decrement() {
        let mut cart = Cart::new();
        cart.add_or_increment(shirt("Red"));
        assert_eq!(cart.increment(0).unwrap().get(), 2);
        assert_eq!(cart.decrement(0), Ok(true));
        assert_eq!(cart.items()[0].quantity().get(), 1);
    }

    #[test]
    fn test_set_quantity_parses_and_clamps() {
        let mut cart = Cart::new();
        cart.add_or_increment(shirt("Red"));

        assert_eq!(cart.set_quantity(0, "5").unwrap().get(), 5);
        assert_eq!(cart.set_quantity(0, "abc").unwrap().get(), 1);
        assert_eq!(cart.set_quantity(0, "0").unwrap().get(), 1);
        assert_eq!(cart.set_quantity(0, "-2").unwrap().get(), 1);
    }

    #[test]
    fn test_remove_shifts_rows() {
        let mut cart = Cart::new();
        cart.add_or_increment(shirt("Red"));
        cart.add_or_increment(shirt("Blue"));
        cart.add_or_increment(shirt("Green"));

        let removed = cart.remove(0).unwrap();
        assert_eq!(removed.variant.color, "Red");
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].variant.color, "Blue");
        assert_eq!(cart.items()[1].variant.color, "Green");
    }

    #[test]
    fn test_out_of_range_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        cart.add_or_increment(shirt("Red"));
        let before = cart.clone();

        let expected = Err(CartError::IndexOutOfRange { index: 3, len: 1 });
        assert_eq!(cart.increment(3).map(|_| ()), expected.clone());
        assert_eq!(cart.decrement(3).map(|_| ()), expected.clone());
        assert_eq!(cart.set_quantity(3, "9").map(|_| ()), expected.clone());
        assert_eq!(cart.remove(3).map(|_| ()), expected);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_huge_price_times_quantity_saturates() {
        let mut cart = Cart::new();
        cart.add_or_increment(LineItem::new(
            "Yacht",
            Decimal::MAX,
            Variant::default(),
            "/media/yacht.jpg",
        ));
        cart.increment(0).unwrap();

        assert_eq!(cart.items()[0].line_total(), Decimal::MAX);
        assert_eq!(cart.totals().subtotal, Decimal::MAX);
        assert_eq!(cart.totals().quantity, 2);
    }

    #[test]
    fn test_huge_quantity_saturates() {
        let mut cart = Cart::new();
        cart.add_or_increment(LineItem::new(
            "Island",
            Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0),
            Variant::default(),
            "/media/island.jpg",
        ));
        cart.set_quantity(0, "4294967295").unwrap();

        assert_eq!(cart.totals().subtotal, Decimal::MAX);
    }

    #[test]
    fn test_sum_of_large_rows_saturates() {
        let half = Decimal::MAX / Decimal::TWO + Decimal::ONE;
        let mut cart = Cart::new();
        cart.add_or_increment(LineItem::new("A", half, Variant::default(), "a.jpg"));
        cart.add_or_increment(LineItem::new("B", half, Variant::default(), "b.jpg"));

        assert_eq!(cart.totals().subtotal, Decimal::MAX);
    }

    #[test]
    fn test_empty_totals() {
        let totals = Cart::new().totals();
        assert_eq!(totals.quantity, 0);
        assert_eq!(totals.subtotal, Decimal::ZERO);
    }
}
