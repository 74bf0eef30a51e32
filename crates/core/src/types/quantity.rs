//! Line item quantity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`] strictly.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// Quantities start at one.
    #[error("quantity must be at least 1")]
    Zero,
}

/// A positive item count.
///
/// ## Constraints
///
/// - Always at least 1
/// - Arithmetic saturates at `u32::MAX` rather than wrapping
///
/// ## Examples
///
/// ```
/// use cart_drawer_core::{Quantity, parse_quantity};
///
/// assert_eq!(parse_quantity("3").get(), 3);
/// assert_eq!(parse_quantity("abc").get(), 1);
/// assert_eq!(parse_quantity("-4").get(), 1);
/// assert_eq!(Quantity::clamped(0), Quantity::ONE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(1);

    /// Create a quantity, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns `QuantityError::Zero` when `n` is 0.
    pub const fn new(n: u32) -> Result<Self, QuantityError> {
        if n == 0 {
            Err(QuantityError::Zero)
        } else {
            Ok(Self(n))
        }
    }

    /// Create a quantity, raising anything below 1 to 1.
    #[must_use]
    pub const fn clamped(n: u32) -> Self {
        if n == 0 { Self::ONE } else { Self(n) }
    }

    /// The underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Sum of two quantities, saturating at `u32::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// One less, or `None` when already at 1.
    #[must_use]
    pub const fn checked_decrement(self) -> Option<Self> {
        if self.0 > 1 { Some(Self(self.0 - 1)) } else { None }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> Self {
        q.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a quantity typed into a quantity field.
///
/// Reads a leading integer the way form inputs are usually read: leading
/// whitespace is skipped, an optional sign is accepted, then digits are
/// consumed up to the first non-digit (`"12abc"` is 12, `"2.7"` is 2). No
/// digits, a negative value or zero all yield 1. Values beyond `u32::MAX`
/// saturate.
#[must_use]
pub fn parse_quantity(input: &str) -> Quantity {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, trimmed.get(1..).unwrap_or("")),
        Some(b'+') => (false, trimmed.get(1..).unwrap_or("")),
        _ => (false, trimmed),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit);
    let mut value: u32 = 0;
    let mut any = false;
    for digit in digits {
        any = true;
        value = value
            .saturating_mul(10)
            .saturating_add(u32::from(digit - b'0'));
    }

    if !any || negative {
        return Quantity::ONE;
    }
    Quantity::clamped(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_quantity("1").get(), 1);
        assert_eq!(parse_quantity("42").get(), 42);
        assert_eq!(parse_quantity("  7").get(), 7);
        assert_eq!(parse_quantity("+5").get(), 5);
    }

    #[test]
    fn test_parse_leading_integer_prefix() {
        assert_eq!(parse_quantity("12abc").get(), 12);
        assert_eq!(parse_quantity("2.7").get(), 2);
    }

    #[test]
    fn test_parse_garbage_clamps_to_one() {
        assert_eq!(parse_quantity("abc").get(), 1);
        assert_eq!(parse_quantity("").get(), 1);
        assert_eq!(parse_quantity("-").get(), 1);
        assert_eq!(parse_quantity("0").get(), 1);
        assert_eq!(parse_quantity("-3").get(), 1);
    }

    #[test]
    fn test_parse_saturates() {
        assert_eq!(parse_quantity("99999999999999").get(), u32::MAX);
    }

    #[test]
    fn test_new_rejects_zero() {
        assert_eq!(Quantity::new(0), Err(QuantityError::Zero));
        assert_eq!(Quantity::new(2).unwrap().get(), 2);
    }

    #[test]
    fn test_checked_decrement_stops_at_one() {
        assert_eq!(Quantity::ONE.checked_decrement(), None);
        assert_eq!(Quantity::clamped(2).checked_decrement(), Some(Quantity::ONE));
    }

    #[test]
    fn test_serde_rejects_zero() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("3").unwrap().get(), 3);
    }
}
