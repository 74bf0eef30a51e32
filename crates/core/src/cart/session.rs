//! The visitor's server-side cart.
//!
//! Every successful add-to-cart request also counts the product here, keyed
//! by product id, so the cart page can list it after the drawer's page view
//! is gone. Variants are not tracked on this side.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// Quantities by product id, in id order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionCart {
    lines: BTreeMap<ProductId, u32>,
}

impl SessionCart {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Quantity held for `id`, 0 if absent.
    #[must_use]
    pub fn quantity(&self, id: ProductId) -> u32 {
        self.lines.get(&id).copied().unwrap_or(0)
    }

    /// `(id, quantity)` pairs in id order. Quantities are always ≥ 1.
    pub fn lines(&self) -> impl Iterator<Item = (ProductId, u32)> + '_ {
        self.lines.iter().map(|(&id, &quantity)| (id, quantity))
    }

    /// Count one more of `id`. Returns the new quantity.
    pub fn add_one(&mut self, id: ProductId) -> u32 {
        let quantity = self.lines.entry(id).or_insert(0);
        *quantity = quantity.saturating_add(1);
        *quantity
    }

    /// Overwrite the quantity of `id` with a value typed into the cart page.
    ///
    /// The value must be a whole number (surrounding whitespace and a sign
    /// allowed). Anything else counts as 0. Zero or less removes the product;
    /// values past `u32::MAX` are capped. Returns the stored quantity.
    pub fn set_quantity(&mut self, id: ProductId, value: &str) -> u32 {
        match parse_whole(value) {
            Some(quantity) if quantity > 0 => {
                let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                self.lines.insert(id, quantity);
                quantity
            }
            _ => {
                self.lines.remove(&id);
                0
            }
        }
    }

    /// Drop `id`. Returns whether it was present.
    pub fn remove(&mut self, id: ProductId) -> bool {
        self.lines.remove(&id).is_some()
    }

    /// Sum of `price(id) * quantity` over products `price` knows, saturating
    /// at `Decimal::MAX`. Products it does not know are skipped.
    pub fn total<F>(&self, mut price: F) -> Decimal
    where
        F: FnMut(ProductId) -> Option<Decimal>,
    {
        self.lines()
            .filter_map(|(id, quantity)| {
                price(id).map(|p| p.checked_mul(Decimal::from(quantity)).unwrap_or(Decimal::MAX))
            })
            .fold(Decimal::ZERO, |total, line| {
                total.checked_add(line).unwrap_or(Decimal::MAX)
            })
    }
}

/// Parse a whole number. Digit strings too long for `i64` saturate.
fn parse_whole(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(n) = value.parse::<i64>() {
        return Some(n);
    }

    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, value.get(1..)?),
        Some(b'+') => (false, value.get(1..)?),
        _ => (false, value),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SHIRT: ProductId = ProductId::new(1);
    const TOTE: ProductId = ProductId::new(4);

    #[test]
    fn test_add_one_counts_per_product() {
        let mut cart = SessionCart::new();
        assert_eq!(cart.add_one(SHIRT), 1);
        assert_eq!(cart.add_one(SHIRT), 2);
        assert_eq!(cart.add_one(TOTE), 1);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.lines().collect::<Vec<_>>(), vec![(SHIRT, 2), (TOTE, 1)]);
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = SessionCart::new();
        cart.add_one(SHIRT);

        assert_eq!(cart.set_quantity(SHIRT, " 5 "), 5);
        assert_eq!(cart.quantity(SHIRT), 5);
        assert_eq!(cart.set_quantity(SHIRT, "+2"), 2);
        assert_eq!(cart.set_quantity(SHIRT, "99999999999999999999999"), u32::MAX);
    }

    #[test]
    fn test_set_quantity_zero_or_junk_removes() {
        for value in ["0", "-1", "abc", "2.5", "", "-99999999999999999999999"] {
            let mut cart = SessionCart::new();
            cart.add_one(SHIRT);
            assert_eq!(cart.set_quantity(SHIRT, value), 0, "{value:?}");
            assert!(cart.is_empty(), "{value:?}");
        }
    }

    #[test]
    fn test_remove() {
        let mut cart = SessionCart::new();
        cart.add_one(SHIRT);
        assert!(cart.remove(SHIRT));
        assert!(!cart.remove(SHIRT));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_skips_unknown_and_saturates() {
        let mut cart = SessionCart::new();
        cart.add_one(SHIRT);
        cart.add_one(SHIRT);
        cart.add_one(TOTE);
        cart.add_one(ProductId::new(99));

        let price = |id: ProductId| match id.as_i32() {
            1 => Some(Decimal::from(20)),
            4 => Some(Decimal::new(59_900, 2)),
            _ => None,
        };
        assert_eq!(cart.total(price), Decimal::new(63_900, 2));

        cart.set_quantity(SHIRT, "4294967295");
        assert_eq!(cart.total(|_| Some(Decimal::MAX)), Decimal::MAX);
    }

    #[test]
    fn test_session_json_shape() {
        let mut cart = SessionCart::new();
        cart.add_one(TOTE);
        cart.add_one(SHIRT);
        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(json, r#"{"1":1,"4":1}"#);
        assert_eq!(serde_json::from_str::<SessionCart>(&json).unwrap(), cart);
    }
}
