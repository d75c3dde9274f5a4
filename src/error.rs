//! Crate-wide error type.
//!
//! Construction and registration failures are synchronous and caller-visible;
//! nothing is retried or swallowed. The drawing pipeline itself never fails
//! once construction succeeded (out-of-bounds drawing clips instead of
//! erroring), so [`UiError`] only shows up at the edges: constructors,
//! element/view registration, and the physical flush path.

use std::io;

/// Errors surfaced by weft-tui.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    /// An argument was outside its allowed range.
    #[error("argument `{name}` out of range")]
    Range {
        /// The offending parameter.
        name: &'static str,
    },

    /// The element is already part of the view.
    #[error("the element was already added to this view")]
    DuplicateElement,

    /// The element is already owned by a view.
    #[error("the element is already owned by a view")]
    AlreadyOwned,

    /// A view with this name already exists on the hub.
    #[error("a view named `{name}` already exists")]
    DuplicateView {
        /// The conflicting view name.
        name: String,
    },

    /// No view with this name exists on the hub.
    #[error("no view named `{name}` exists")]
    UnknownView {
        /// The requested view name.
        name: String,
    },

    /// A previous hub registration is still live.
    #[error("a previous hub is still registered")]
    HubActive,

    /// The operation requires state the receiver is not in.
    #[error("invalid state: {reason}")]
    InvalidState {
        /// What was wrong.
        reason: &'static str,
    },

    /// An I/O failure while flushing to the physical console.
    #[error("console I/O error: {0}")]
    Io(#[from] io::Error),
}

impl UiError {
    pub(crate) fn range(name: &'static str) -> Self {
        Self::Range { name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            UiError::range("width").to_string(),
            "argument `width` out of range"
        );
        assert_eq!(
            UiError::UnknownView {
                name: "main".into()
            }
            .to_string(),
            "no view named `main` exists"
        );
    }
}
