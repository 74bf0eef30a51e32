//! Delegated event handling for the drawer.
//!
//! One listener on `#cart-items` (plus the close button and overlay) turns
//! raw events into [`DrawerCommand`]s. The row index is read from the
//! control's `data-idx` at the moment the event fires, so a command always
//! addresses the row as currently rendered; nothing is captured per row.

use super::dom::{
    CLOSE_BUTTON_ID, INCREASE_CLASS, OVERLAY_ID, QUANTITY_INPUT_CLASS, REDUCE_CLASS,
    REMOVE_CLASS, has_class,
};

/// Kind of DOM event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Change,
}

/// The parts of an event target the drawer looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlEvent<'a> {
    pub kind: EventKind,
    /// Target element id.
    pub id: Option<&'a str>,
    /// Target class list (space separated).
    pub class_name: &'a str,
    /// Target `data-idx`, read at event time.
    pub data_idx: Option<&'a str>,
    /// Target value (inputs only).
    pub value: Option<&'a str>,
}

impl<'a> ControlEvent<'a> {
    /// A click on an element with the given classes.
    #[must_use]
    pub const fn click(class_name: &'a str) -> Self {
        Self {
            kind: EventKind::Click,
            id: None,
            class_name,
            data_idx: None,
            value: None,
        }
    }

    /// A click on the element with the given id.
    #[must_use]
    pub const fn click_id(id: &'a str) -> Self {
        Self {
            kind: EventKind::Click,
            id: Some(id),
            class_name: "",
            data_idx: None,
            value: None,
        }
    }

    /// A change of an input's value.
    #[must_use]
    pub const fn change(class_name: &'a str, value: &'a str) -> Self {
        Self {
            kind: EventKind::Change,
            id: None,
            class_name,
            data_idx: None,
            value: Some(value),
        }
    }

    /// Attach the target's `data-idx`.
    #[must_use]
    pub const fn with_idx(mut self, data_idx: &'a str) -> Self {
        self.data_idx = Some(data_idx);
        self
    }
}

/// What an event asks the drawer to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawerCommand {
    Increment(usize),
    Decrement(usize),
    SetQuantity { index: usize, value: String },
    Remove(usize),
    Close,
}

impl DrawerCommand {
    /// Interpret an event. Returns `None` for events the drawer ignores,
    /// including row controls whose `data-idx` is missing or not a number.
    #[must_use]
    pub fn from_event(event: &ControlEvent<'_>) -> Option<Self> {
        if event.kind == EventKind::Click
            && matches!(event.id, Some(CLOSE_BUTTON_ID | OVERLAY_ID))
        {
            return Some(Self::Close);
        }

        let index = event.data_idx?.trim().parse::<usize>().ok()?;
        let classes = event.class_name;

        match event.kind {
            EventKind::Click if has_class(classes, INCREASE_CLASS) => Some(Self::Increment(index)),
            EventKind::Click if has_class(classes, REDUCE_CLASS) => Some(Self::Decrement(index)),
            EventKind::Click if has_class(classes, REMOVE_CLASS) => Some(Self::Remove(index)),
            EventKind::Change if has_class(classes, QUANTITY_INPUT_CLASS) => {
                Some(Self::SetQuantity {
                    index,
                    value: event.value.unwrap_or_default().to_string(),
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_controls() {
        assert_eq!(
            DrawerCommand::from_event(&ControlEvent::click("qty-control__increase").with_idx("2")),
            Some(DrawerCommand::Increment(2))
        );
        assert_eq!(
            DrawerCommand::from_event(&ControlEvent::click("qty-control__reduce").with_idx("0")),
            Some(DrawerCommand::Decrement(0))
        );
        assert_eq!(
            DrawerCommand::from_event(
                &ControlEvent::click("btn-close-xs position-absolute js-cart-item-remove")
                    .with_idx("1")
            ),
            Some(DrawerCommand::Remove(1))
        );
        assert_eq!(
            DrawerCommand::from_event(
                &ControlEvent::change("qty-control__number border-0 text-center", "abc")
                    .with_idx("3")
            ),
            Some(DrawerCommand::SetQuantity {
                index: 3,
                value: "abc".to_string()
            })
        );
    }

    #[test]
    fn test_close_targets() {
        assert_eq!(
            DrawerCommand::from_event(&ControlEvent::click_id("close-cart-btn")),
            Some(DrawerCommand::Close)
        );
        assert_eq!(
            DrawerCommand::from_event(&ControlEvent::click_id("page-overlay")),
            Some(DrawerCommand::Close)
        );
    }

    #[test]
    fn test_ignored_events() {
        // Missing or malformed index.
        assert_eq!(
            DrawerCommand::from_event(&ControlEvent::click("qty-control__increase")),
            None
        );
        assert_eq!(
            DrawerCommand::from_event(&ControlEvent::click("qty-control__increase").with_idx("x")),
            None
        );
        assert_eq!(
            DrawerCommand::from_event(&ControlEvent::click("qty-control__increase").with_idx("-1")),
            None
        );
        // Clicks inside a row that are not controls.
        assert_eq!(
            DrawerCommand::from_event(&ControlEvent::click("cart-drawer-item__title").with_idx("0")),
            None
        );
        // A click on the quantity input is not a change.
        assert_eq!(
            DrawerCommand::from_event(&ControlEvent::click("qty-control__number").with_idx("0")),
            None
        );
    }
}
