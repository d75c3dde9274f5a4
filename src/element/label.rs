//! Label - a plain text display element.

use crate::element::{
    bake_text_pattern, Element, ElementBase, Layoutable, Property, TextContent, TextElement,
};
use crate::pattern::Pattern;
use crate::renderer::ScreenBuffer;
use crate::text::{self, TextStyle};
use crate::types::{AlignmentHorizontal, AlignmentVertical};

/// A simple element that displays a block of text.
///
/// The text is laid out into the label's `width x height` cells per its
/// alignment, wrap and filler settings; the result is baked into a pattern
/// that is rebuilt on every non-position change. Dimensions below 1 clamp to
/// 1 at construction.
pub struct Label {
    base: ElementBase,
    content: TextContent,
    pattern: Pattern,
}

impl Label {
    /// A single-row label sized to its text, aligned left/top.
    pub fn new(x: i32, y: i32, text: &str) -> Self {
        let width = text.chars().count() as i32;
        Self::with_layout(
            x,
            y,
            width,
            1,
            text,
            AlignmentHorizontal::Left,
            AlignmentVertical::Top,
            true,
        )
    }

    /// An empty label with explicit dimensions.
    pub fn sized(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::with_text(x, y, width, height, "")
    }

    /// A label with explicit dimensions and text, aligned left/top.
    pub fn with_text(x: i32, y: i32, width: i32, height: i32, text: &str) -> Self {
        Self::with_layout(
            x,
            y,
            width,
            height,
            text,
            AlignmentHorizontal::Left,
            AlignmentVertical::Top,
            true,
        )
    }

    /// A fully configured label.
    #[allow(clippy::too_many_arguments)]
    pub fn with_layout(
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        text: &str,
        horizontal: AlignmentHorizontal,
        vertical: AlignmentVertical,
        wrap: bool,
    ) -> Self {
        let style = TextStyle {
            horizontal,
            vertical,
            wrap,
            filler: ' ',
        };

        let mut label = Self {
            base: ElementBase::at(x, y, width.max(1), height.max(1)),
            content: TextContent::new(text, style),
            pattern: Pattern::empty(),
        };
        label.rebake();
        label
    }

    fn rebake(&mut self) {
        let rows = text::layout_rows(
            self.content.text(),
            self.width(),
            self.height(),
            self.content.style(),
        );
        self.pattern = bake_text_pattern(
            self.width(),
            self.height(),
            &rows,
            self.background(),
            self.foreground(),
        );
    }

    #[cfg(test)]
    pub(crate) fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

impl Element for Label {
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
}

impl Layoutable for Label {
    crate::element::element_geometry!();
}

impl TextElement for Label {
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
