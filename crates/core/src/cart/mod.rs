//! Cart line items, the in-memory cart store and the session cart.
//!
//! [`Cart`] lives only for one page view. It is owned by whoever drives the
//! drawer and is never shared, so every operation takes `&mut self`.
//! [`SessionCart`] is the server's per-visitor tally behind the cart page.

mod line_item;
mod session;
mod store;

pub use line_item::{DEFAULT_COLOR, DEFAULT_SIZE, LineItem, Variant};
pub use session::SessionCart;
pub use store::{Cart, CartError, CartTotals};
