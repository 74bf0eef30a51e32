//! The cart drawer: a slide-in panel listing the shopper's cart.
//!
//! # Architecture
//!
//! - [`CartDrawer`] owns the [`Cart`] for one page view and is the only thing
//!   that mutates it
//! - Every successful mutation re-renders the whole row list through
//!   [`DrawerView`] and writes it to a [`DrawerSurface`]
//! - Row controls are handled by one delegated listener ([`DrawerCommand`]),
//!   which reads the row index from the clicked element at event time
//! - Add-to-cart clicks go through an [`AddToCartApi`]; the request is sent
//!   with [`send_add`] and applied with [`CartDrawer::complete_add`]
//!
//! # Example
//!
//! ```rust,ignore
//! let client = AddToCartClient::new(config.add_to_cart_url()?)?;
//! let mut drawer = CartDrawer::new(MemorySurface::new(), CurrencyCode::INR);
//!
//! let trigger = AddToCartTrigger::from_attributes([("data-product-id", "1")])?;
//! drawer.add_to_cart(&client, trigger).await?;
//!
//! drawer.handle_event(&ControlEvent::click("qty-control__increase").with_idx("0"))?;
//! ```

pub mod client;
pub mod dom;
pub mod events;
pub mod notice;
pub mod render;
pub mod surface;
pub mod trigger;
pub mod visibility;

pub use client::{
    AddToCartApi, AddToCartClient, AddToCartError, AddedProduct, CompletedAdd, send_add,
};
pub use events::{ControlEvent, DrawerCommand, EventKind};
pub use notice::Notice;
pub use render::{DrawerRow, DrawerView};
pub use surface::{ClassTarget, DrawerSurface, MemorySurface};
pub use trigger::{AddToCartTrigger, TriggerError};
pub use visibility::Visibility;

use cart_drawer_core::{Cart, CartError, CurrencyCode, LineItem};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Errors that can occur while driving the drawer.
#[derive(Debug, Error)]
pub enum DrawerError {
    /// The row template failed to render.
    #[error("failed to render cart drawer: {0}")]
    Render(#[from] askama::Error),
}

/// Result of handling one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// The cart changed and the drawer was re-rendered.
    Rendered,
    /// The command was valid but changed nothing (decrement at 1).
    Unchanged,
    /// The drawer was closed.
    Closed,
    /// The event was not for the drawer, or addressed a row that does not
    /// exist.
    Ignored,
}

/// Result of applying a finished add-to-cart request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The item is in the cart at this row and the drawer is open.
    Added { index: usize },
    /// The shopper was shown this notice; the cart is unchanged.
    Notified(Notice),
}

/// Drawer controller for one page view.
pub struct CartDrawer<S> {
    cart: Cart,
    visibility: Visibility,
    currency: CurrencyCode,
    surface: S,
}

impl<S: DrawerSurface> CartDrawer<S> {
    /// Create a closed drawer over an empty cart.
    #[must_use]
    pub const fn new(surface: S, currency: CurrencyCode) -> Self {
        Self::with_cart(Cart::new(), surface, currency)
    }

    /// Create a closed drawer over an existing cart.
    #[must_use]
    pub const fn with_cart(cart: Cart, surface: S, currency: CurrencyCode) -> Self {
        Self {
            cart,
            visibility: Visibility::Closed,
            currency,
            surface,
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// The view for the current cart.
    #[must_use]
    pub fn view(&self) -> DrawerView {
        DrawerView::project(&self.cart, self.currency)
    }

    /// Show the drawer and render the current cart.
    ///
    /// # Errors
    ///
    /// Returns `DrawerError::Render` if the rows fail to render.
    pub fn open(&mut self) -> Result<(), DrawerError> {
        self.visibility = Visibility::Open;
        self.visibility.apply(&mut self.surface);
        self.render()
    }

    /// Hide the drawer. Does not re-render.
    pub fn close(&mut self) {
        self.visibility = Visibility::Closed;
        self.visibility.apply(&mut self.surface);
    }

    /// Add an item (merging with an existing row) and open the drawer.
    ///
    /// # Errors
    ///
    /// Returns `DrawerError::Render` if the rows fail to render.
    pub fn add_item(&mut self, item: LineItem) -> Result<usize, DrawerError> {
        let index = self.cart.add_or_increment(item);
        debug!(index, rows = self.cart.len(), "cart row added");
        self.open()?;
        Ok(index)
    }

    /// Handle an event from the drawer's delegated listener.
    ///
    /// # Errors
    ///
    /// Returns `DrawerError::Render` if the rows fail to render.
    pub fn handle_event(&mut self, event: &ControlEvent<'_>) -> Result<EventOutcome, DrawerError> {
        match DrawerCommand::from_event(event) {
            Some(command) => self.apply(command),
            None => Ok(EventOutcome::Ignored),
        }
    }

    /// Apply a drawer command to the cart and re-render.
    ///
    /// A command addressing a row that no longer exists is ignored.
    ///
    /// # Errors
    ///
    /// Returns `DrawerError::Render` if the rows fail to render.
    #[instrument(skip(self), level = "debug")]
    pub fn apply(&mut self, command: DrawerCommand) -> Result<EventOutcome, DrawerError> {
        let changed = match command {
            DrawerCommand::Close => {
                self.close();
                return Ok(EventOutcome::Closed);
            }
            DrawerCommand::Increment(index) => self.cart.increment(index).map(|_| true),
            DrawerCommand::Decrement(index) => self.cart.decrement(index),
            DrawerCommand::SetQuantity { index, value } => {
                self.cart.set_quantity(index, &value).map(|_| true)
            }
            DrawerCommand::Remove(index) => self.cart.remove(index).map(|_| true),
        };

        match changed {
            Ok(true) => {
                self.render()?;
                Ok(EventOutcome::Rendered)
            }
            Ok(false) => Ok(EventOutcome::Unchanged),
            Err(CartError::IndexOutOfRange { index, len }) => {
                debug!(index, len, "ignoring command for missing cart row");
                Ok(EventOutcome::Ignored)
            }
        }
    }

    /// Send an add-to-cart request and apply its result.
    ///
    /// # Errors
    ///
    /// Returns `DrawerError::Render` if the rows fail to render.
    pub async fn add_to_cart<C: AddToCartApi>(
        &mut self,
        api: &C,
        trigger: AddToCartTrigger,
    ) -> Result<AddOutcome, DrawerError> {
        let completed = send_add(api, trigger).await;
        self.complete_add(completed)
    }

    /// Apply a finished add-to-cart request.
    ///
    /// On success the returned product, the trigger's variant and a quantity
    /// of one become a line item and the drawer opens. On failure the
    /// shopper is notified and neither the cart nor the drawer changes.
    ///
    /// # Errors
    ///
    /// Returns `DrawerError::Render` if the rows fail to render.
    pub fn complete_add(&mut self, completed: CompletedAdd) -> Result<AddOutcome, DrawerError> {
        let CompletedAdd { trigger, result } = completed;

        match result {
            Ok(product) => {
                let item = LineItem::new(product.name, product.price, trigger.variant, product.image);
                let index = self.add_item(item)?;
                Ok(AddOutcome::Added { index })
            }
            Err(e) => {
                let notice = e.notice();
                warn!(product_id = %trigger.product_id, error = %e, "add to cart failed");
                self.surface.notify(notice);
                Ok(AddOutcome::Notified(notice))
            }
        }
    }

    /// Rebuild the row list, badge and subtotal from the cart.
    fn render(&mut self) -> Result<(), DrawerError> {
        let view = self.view();
        let markup = view.items_markup()?;
        self.surface.replace_items(&markup);
        self.surface.set_item_count(&view.item_count.to_string());
        self.surface.set_subtotal(&view.subtotal);
        Ok(())
    }
}
