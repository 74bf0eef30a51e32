//! Drawer open/closed state.

use super::surface::{ClassTarget, DrawerSurface};

/// Classes that are present exactly while the drawer is open.
pub const OPEN_CLASSES: [(ClassTarget, &str); 3] = [
    (ClassTarget::Drawer, "active"),
    (ClassTarget::Overlay, "visible"),
    (ClassTarget::Body, "overflow-hidden"),
];

/// Whether the drawer panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Closed,
    Open,
}

impl Visibility {
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// Write this state's classes to the surface: slide the panel in, dim
    /// the page and lock scrolling when open; undo all three when closed.
    pub fn apply<S: DrawerSurface + ?Sized>(self, surface: &mut S) {
        for (target, class) in OPEN_CLASSES {
            surface.set_class(target, class, self.is_open());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawer::surface::MemorySurface;

    #[test]
    fn test_open_then_close_restores_classes() {
        let mut surface = MemorySurface::new();

        Visibility::Open.apply(&mut surface);
        assert!(surface.has_class(ClassTarget::Drawer, "active"));
        assert!(surface.has_class(ClassTarget::Overlay, "visible"));
        assert!(surface.has_class(ClassTarget::Body, "overflow-hidden"));

        Visibility::Closed.apply(&mut surface);
        assert!(surface.classes.is_empty());
    }
}
