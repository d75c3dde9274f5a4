//! Input classification.
//!
//! One raw key event is classified against configurable key+modifier
//! bindings into a set of semantic [`InputKind`] flags. A single keystroke
//! may match zero or more kinds at once (the flags compose bitwise); a
//! keystroke matching none is a generic input, which focus routing ignores
//! and widgets may still inspect through the raw key.
//!
//! # Example
//!
//! ```ignore
//! use weft_tui::input::{InputCatcher, InputKind, KeyCombo, KeyCode};
//!
//! let mut catcher = InputCatcher::new();
//! catcher.set_input(InputKind::ENTER, vec![KeyCombo::new(KeyCode::Enter)]);
//! ```

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};

pub use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

bitflags::bitflags! {
    /// Semantic categories a keystroke can be classified into.
    ///
    /// The empty set is a generic input.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct InputKind: u8 {
        /// Activate the focused widget.
        const ENTER = 1;
        /// Move the selection to the previous widget.
        const SELECTION_UP = 1 << 1;
        /// Move the selection to the next widget.
        const SELECTION_DOWN = 1 << 2;
        /// Cycle left inside the focused widget.
        const LEFT = 1 << 3;
        /// Cycle right inside the focused widget.
        const RIGHT = 1 << 4;
    }
}

/// The semantic kinds consulted during classification.
const SPECIAL_KINDS: [InputKind; 5] = [
    InputKind::ENTER,
    InputKind::SELECTION_UP,
    InputKind::SELECTION_DOWN,
    InputKind::LEFT,
    InputKind::RIGHT,
];

/// One concrete key plus the exact modifier set it must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCombo {
    /// The key code to match.
    pub code: KeyCode,
    /// The modifier set to match, exactly.
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    /// A combo with no modifiers.
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// A combo with an explicit modifier set.
    pub const fn with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Exact match against a key event: code and full modifier set.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.modifiers
    }
}

/// A classified keystroke on its way through the view.
#[derive(Debug, Clone)]
pub struct InputEvent {
    /// The semantic kinds this keystroke matched (possibly empty).
    pub kinds: InputKind,
    /// The raw key event.
    pub key: KeyEvent,
    consumed: bool,
}

impl InputEvent {
    /// Wrap a classified key event.
    pub fn new(kinds: InputKind, key: KeyEvent) -> Self {
        Self {
            kinds,
            key,
            consumed: false,
        }
    }

    /// Mark this input as handled; routing stops afterwards.
    pub fn consume(&mut self) {
        self.consumed = true;
    }

    /// Whether a widget already handled this input.
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}

/// Reads keystrokes and classifies them against the configured bindings.
#[derive(Debug, Default)]
pub struct InputCatcher {
    bindings: HashMap<InputKind, Vec<KeyCombo>>,
}

impl InputCatcher {
    /// A catcher with no bindings; every keystroke classifies as generic.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole binding list for one kind atomically.
    pub fn set_input(&mut self, kind: InputKind, combos: Vec<KeyCombo>) {
        self.bindings.insert(kind, combos);
    }

    /// Classify a key event into the set of matching kinds.
    pub fn classify(&self, key: &KeyEvent) -> InputKind {
        let mut kinds = InputKind::empty();

        for special in SPECIAL_KINDS {
            let Some(combos) = self.bindings.get(&special) else {
                continue;
            };
            if combos.iter().any(|combo| combo.matches(key)) {
                kinds |= special;
            }
        }

        kinds
    }

    /// Non-blocking read of one key press, classified.
    ///
    /// Returns `Ok(None)` when no key press is pending. Repeat and release
    /// events are ignored.
    pub fn poll(&self) -> std::io::Result<Option<InputEvent>> {
        if !event::poll(Duration::from_millis(0))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let kinds = self.classify(&key);
                log::trace!("key {:?} classified as {:?}", key.code, kinds);
                Ok(Some(InputEvent::new(kinds, key)))
            }
            _ => Ok(None),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_unbound_key_is_generic() {
        let catcher = InputCatcher::new();
        assert_eq!(catcher.classify(&key(KeyCode::Enter)), InputKind::empty());
    }

    #[test]
    fn test_classify_single_kind() {
        let mut catcher = InputCatcher::new();
        catcher.set_input(
            InputKind::ENTER,
            vec![KeyCombo::new(KeyCode::Enter), KeyCombo::new(KeyCode::Char(' '))],
        );

        assert_eq!(catcher.classify(&key(KeyCode::Enter)), InputKind::ENTER);
        assert_eq!(catcher.classify(&key(KeyCode::Char(' '))), InputKind::ENTER);
        assert_eq!(catcher.classify(&key(KeyCode::Left)), InputKind::empty());
    }

    #[test]
    fn test_modifiers_match_exactly() {
        let mut catcher = InputCatcher::new();
        catcher.set_input(
            InputKind::SELECTION_UP,
            vec![KeyCombo::with_modifiers(KeyCode::Tab, KeyModifiers::SHIFT)],
        );

        assert_eq!(catcher.classify(&key(KeyCode::Tab)), InputKind::empty());
        assert_eq!(
            catcher.classify(&KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT)),
            InputKind::SELECTION_UP
        );
        assert_eq!(
            catcher.classify(&KeyEvent::new(
                KeyCode::Tab,
                KeyModifiers::SHIFT | KeyModifiers::CONTROL
            )),
            InputKind::empty()
        );
    }

    #[test]
    fn test_one_key_can_match_several_kinds() {
        let mut catcher = InputCatcher::new();
        catcher.set_input(InputKind::ENTER, vec![KeyCombo::new(KeyCode::Char('x'))]);
        catcher.set_input(InputKind::RIGHT, vec![KeyCombo::new(KeyCode::Char('x'))]);

        assert_eq!(
            catcher.classify(&key(KeyCode::Char('x'))),
            InputKind::ENTER | InputKind::RIGHT
        );
    }

    #[test]
    fn test_set_input_replaces_bindings() {
        let mut catcher = InputCatcher::new();
        catcher.set_input(InputKind::LEFT, vec![KeyCombo::new(KeyCode::Left)]);
        catcher.set_input(InputKind::LEFT, vec![KeyCombo::new(KeyCode::Char('h'))]);

        assert_eq!(catcher.classify(&key(KeyCode::Left)), InputKind::empty());
        assert_eq!(catcher.classify(&key(KeyCode::Char('h'))), InputKind::LEFT);
    }

    #[test]
    fn test_consume() {
        let mut event = InputEvent::new(InputKind::ENTER, key(KeyCode::Enter));
        assert!(!event.is_consumed());
        event.consume();
        assert!(event.is_consumed());
    }
}
