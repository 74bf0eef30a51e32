//! The document the drawer writes into.
//!
//! [`DrawerSurface`] is the seam between the controller and a page. This
//! crate ships no browser binding: the served pages carry the drawer markup,
//! and [`MemorySurface`] records the writes the drawer would make to it.

use std::collections::BTreeSet;

use super::notice::Notice;

/// Elements whose classes the drawer toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClassTarget {
    /// `#cartDrawer`
    Drawer,
    /// `#page-overlay`
    Overlay,
    /// `<body>`
    Body,
}

/// Writes the drawer performs on its host document.
pub trait DrawerSurface {
    /// Replace the contents of the row list with `markup`.
    fn replace_items(&mut self, markup: &str);

    /// Set the text of every item-count badge.
    fn set_item_count(&mut self, text: &str);

    /// Set the subtotal text.
    fn set_subtotal(&mut self, text: &str);

    /// Add (`enabled`) or remove a class on `target`.
    fn set_class(&mut self, target: ClassTarget, class: &str, enabled: bool);

    /// Show a blocking notice.
    fn notify(&mut self, notice: Notice);
}

/// A surface that keeps the last written state in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    pub items_markup: String,
    pub item_count: String,
    pub subtotal: String,
    pub classes: BTreeSet<(ClassTarget, String)>,
    pub notices: Vec<Notice>,
    /// Number of times the row list was replaced.
    pub renders: usize,
}

impl MemorySurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_class(&self, target: ClassTarget, class: &str) -> bool {
        self.classes.contains(&(target, class.to_string()))
    }
}

impl DrawerSurface for MemorySurface {
    fn replace_items(&mut self, markup: &str) {
        markup.clone_into(&mut self.items_markup);
        self.renders += 1;
    }

    fn set_item_count(&mut self, text: &str) {
        text.clone_into(&mut self.item_count);
    }

    fn set_subtotal(&mut self, text: &str) {
        text.clone_into(&mut self.subtotal);
    }

    fn set_class(&mut self, target: ClassTarget, class: &str, enabled: bool) {
        if enabled {
            self.classes.insert((target, class.to_string()));
        } else {
            self.classes.remove(&(target, class.to_string()));
        }
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

impl<S: DrawerSurface + ?Sized> DrawerSurface for &mut S {
    fn replace_items(&mut self, markup: &str) {
        (**self).replace_items(markup);
    }

    fn set_item_count(&mut self, text: &str) {
        (**self).set_item_count(text);
    }

    fn set_subtotal(&mut self, text: &str) {
        (**self).set_subtotal(text);
    }

    fn set_class(&mut self, target: ClassTarget, class: &str, enabled: bool) {
        (**self).set_class(target, class, enabled);
    }

    fn notify(&mut self, notice: Notice) {
        (**self).notify(notice);
    }
}
