//! Core types for the cart drawer.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod currency;
pub mod id;
pub mod quantity;

pub use currency::{CurrencyCode, CurrencyError};
pub use id::*;
pub use quantity::{Quantity, QuantityError, parse_quantity};
