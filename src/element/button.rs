//! Button - an interactive text element firing a pressed notification.

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

/// An interactive element that fires its pressed hooks on an
/// `Enter`-classified input while selected.
///
/// Renders like a centered label; while selected the palette swaps to the
/// selected colors. The Enter input is consumed so the view does not also
/// treat it as navigation.
///
/// Pressed hooks run during input dispatch, while the button itself is
/// mutably borrowed: mutate other widgets from a hook, not the button.
pub struct Button {
    base: ElementBase,
    interactive: InteractiveBase,
    content: TextContent,
    pattern: Pattern,
    pressed: Vec<Box<dyn Fn()>>,
}

impl Button {
    /// A button with explicit dimensions (both at least 1) and text.
    pub fn new(x: i32, y: i32, width: i32, height: i32, text: &str) -> Result<Self, UiError> {
        if width < 1 {
            return Err(UiError::range("width"));
        }
        if height < 1 {
            return Err(UiError::range("height"));
        }

        let style = TextStyle {
            horizontal: AlignmentHorizontal::Middle,
            vertical: AlignmentVertical::Middle,
            wrap: true,
            filler: ' ',
        };

        let mut button = Self {
            base: ElementBase::at(x, y, width, height),
            interactive: InteractiveBase::new(),
            content: TextContent::new(text, style),
            pattern: Pattern::empty(),
            pressed: Vec::new(),
        };
        button.rebake();
        Ok(button)
    }

    /// Register a pressed hook. Hooks fire in registration order.
    pub fn on_pressed(&mut self, hook: impl Fn() + 'static) {
        self.pressed.push(Box::new(hook));
    }

    fn rebake(&mut self) {
        let rows = text::layout_rows(
            self.content.text(),
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

impl Element for Button {
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

impl Layoutable for Button {
    crate::element::element_geometry!();
}

impl Interactive for Button {
    fn interactive_base(&self) -> &InteractiveBase {
        &self.interactive
    }

    fn interactive_base_mut(&mut self) -> &mut InteractiveBase {
        &mut self.interactive
    }

    fn handle_input(&mut self, event: &mut InputEvent) {
        if !event.kinds.contains(InputKind::ENTER) {
            return;
        }

        event.consume();
        for hook in &self.pressed {
            hook();
        }
    }
}

impl TextElement for Button {
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
