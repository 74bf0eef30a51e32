//! Blocking notices shown to the shopper.

use core::fmt;

/// A message the page must show (typically as an alert) after a failed add.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    /// The server answered `success: false`.
    AddRejected,
    /// The request failed or the reply could not be understood.
    AddFailed,
}

impl Notice {
    /// Text shown to the shopper.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::AddRejected => "Failed to add item to cart",
            Self::AddFailed => "Error adding item to cart.",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
