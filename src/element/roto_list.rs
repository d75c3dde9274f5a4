//! RotoList - a rotating selector over named values.

use crate::element::{
    bake_text_pattern, Element, ElementBase, Interactive, InteractiveBase, Layoutable, Property,
    TextContent, TextElement,
};
use crate::error::UiError;
use crate::input::{InputEvent, InputKind};
use crate::pattern::Pattern;
use crate::renderer::ScreenBuffer;
use crate::text::{self, TextStyle};
use crate::types::{AlignmentHorizontal, AlignmentVertical};

/// A single value in a [`RotoList`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotoItem<T> {
    name: String,
    value: T,
}

impl<T> RotoItem<T> {
    /// An item with the display name and the carried value.
    pub fn new(name: &str, value: T) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }

    /// The name shown while this item is current.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The carried value.
    pub fn value(&self) -> &T {
        &self.value
    }
}

/// A carousel of named values cycled with `Left`/`Right` input.
///
/// The display shows the current item's name, centered by default. Cycling
/// wraps around at both ends; `Enter` is consumed without effect (reserved).
/// Every index change fires the changed-item hooks with the new current
/// item.
///
/// Changed-item hooks run during input dispatch, while the list itself is
/// mutably borrowed: mutate other widgets from a hook, not the list.
pub struct RotoList<T> {
    base: ElementBase,
    interactive: InteractiveBase,
    content: TextContent,
    items: Vec<RotoItem<T>>,
    current: Option<usize>,
    pattern: Pattern,
    changed: Vec<Box<dyn Fn(&RotoItem<T>)>>,
}

impl<T> RotoList<T> {
    /// An empty roto list; dimensions must be non-negative.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Result<Self, UiError> {
        let style = TextStyle {
            horizontal: AlignmentHorizontal::Middle,
            vertical: AlignmentVertical::Middle,
            wrap: true,
            filler: ' ',
        };

        Ok(Self {
            base: ElementBase::new(x, y, width, height)?,
            interactive: InteractiveBase::new(),
            content: TextContent::new("", style),
            items: Vec::new(),
            current: None,
            pattern: Pattern::empty(),
            changed: Vec::new(),
        })
    }

    /// Register a changed-item hook. Hooks fire in registration order on
    /// every index change.
    pub fn on_changed(&mut self, hook: impl Fn(&RotoItem<T>) + 'static) {
        self.changed.push(Box::new(hook));
    }

    /// Replace the full item list.
    ///
    /// Selects index 0, or clears the selection when `items` is empty (in
    /// which case no hook fires and the display becomes empty).
    pub fn set_items(&mut self, items: Vec<RotoItem<T>>) {
        self.items = items;
        let index = if self.items.is_empty() { None } else { Some(0) };
        self.select_index(index);
    }

    /// The current item.
    ///
    /// Erroring on an empty list: check [`is_empty`](Self::is_empty) first
    /// or accept the error.
    pub fn current_item(&self) -> Result<&RotoItem<T>, UiError> {
        self.current
            .and_then(|index| self.items.get(index))
            .ok_or(UiError::InvalidState {
                reason: "the roto list has no items",
            })
    }

    /// Whether the list holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn select_index(&mut self, index: Option<usize>) {
        self.current = index;
        self.property_changed(Property::Other);

        if let Some(item) = self.current.and_then(|i| self.items.get(i)) {
            for hook in &self.changed {
                hook(item);
            }
        }
    }

    fn rebake(&mut self) {
        let Some(item) = self.current.and_then(|i| self.items.get(i)) else {
            self.pattern = Pattern::empty();
            return;
        };

        if self.width() < 1 || self.height() < 1 {
            self.pattern = Pattern::empty();
            return;
        }

        let rows = text::layout_rows(
            item.name(),
            self.width(),
            self.height(),
            self.content.style(),
        );
        let (background, foreground) = if self.selected() {
            (self.background_selected(), self.foreground_selected())
        } else {
            (self.background(), self.foreground())
        };
        self.pattern = bake_text_pattern(self.width(), self.height(), &rows, background, foreground);
    }

    #[cfg(test)]
    pub(crate) fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

impl<T> Element for RotoList<T> {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn render(&self, buffer: &ScreenBuffer) {
        buffer.pattern(self.x(), self.y(), &self.pattern);
    }

    fn on_property_changed(&mut self, property: Property) {
        if property.is_position() {
            return;
        }
        self.rebake();
    }

    fn as_interactive(&mut self) -> Option<&mut dyn Interactive> {
        Some(self)
    }
}

impl<T> Layoutable for RotoList<T> {
    crate::element::element_geometry!();
}

impl<T> Interactive for RotoList<T> {
    fn interactive_base(&self) -> &InteractiveBase {
        &self.interactive
    }

    fn interactive_base_mut(&mut self) -> &mut InteractiveBase {
        &mut self.interactive
    }

    fn handle_input(&mut self, event: &mut InputEvent) {
        let relevant = InputKind::LEFT | InputKind::RIGHT | InputKind::ENTER;
        if !event.kinds.intersects(relevant) {
            return;
        }

        event.consume();

        let Some(index) = self.current else {
            return;
        };
        let count = self.items.len();

        if event.kinds.contains(InputKind::LEFT) {
            self.select_index(Some((index + count - 1) % count));
        } else if event.kinds.contains(InputKind::RIGHT) {
            self.select_index(Some((index + 1) % count));
        }
        // Enter: consumed, no index change (reserved).
    }
}

impl<T> TextElement for RotoList<T> {
    fn text_content(&self) -> &TextContent {
        &self.content
    }

    fn text_content_mut(&mut self) -> &mut TextContent {
        &mut self.content
    }
}

// =============================================================================
// Tests
// =============================================================================
