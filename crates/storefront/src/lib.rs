//! Cart drawer storefront library.
//!
//! This crate provides the cart drawer controller and the storefront that
//! hosts it as a library, allowing both to be tested and reused.
//!
//! # Modules
//!
//! - [`drawer`] - The cart drawer: controller, rendering, events and the
//!   add-to-cart client
//! - [`routes`] - HTTP handlers for the host pages, the add-to-cart endpoint
//!   and the session cart page
//! - [`catalog`] - In-memory product catalog backing the endpoint

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod csrf;
pub mod drawer;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
