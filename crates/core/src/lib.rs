//! Cart Drawer Core - Shared types library.
//!
//! This crate provides the types shared by the cart drawer components:
//! - `storefront` - Drawer controller and the storefront that hosts it
//! - `integration-tests` - End-to-end tests driving both
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no HTTP
//! clients, no rendering. The cart itself lives here so it can be tested
//! without a page to render into.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product ids, currency and quantities
//! - [`cart`] - Line items, the in-memory cart store and the session cart
//! - [`product`] - Catalog product records
//! - [`wire`] - The add-to-cart endpoint's JSON reply

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod product;
pub mod types;
pub mod wire;

pub use cart::{
    Cart, CartError, CartTotals, DEFAULT_COLOR, DEFAULT_SIZE, LineItem, SessionCart, Variant,
};
pub use product::Product;
pub use types::*;
pub use wire::{AddToCartReply, WirePrice};
