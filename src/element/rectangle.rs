//! Rectangle - a filled or hollow box.

use crate::element::{Element, ElementBase, Layoutable, Property};
use crate::error::UiError;
use crate::pattern::{Pattern, PatternBuilder};
use crate::renderer::ScreenBuffer;
use crate::types::Symbol;

/// A simple rectangle.
///
/// With thickness 0 the whole area is filled with the filler character; a
/// positive thickness keeps only that many border cells and punches the
/// interior out as transparent. The default filler is the transparent
/// marker, so a fresh rectangle draws nothing until a filler is set.
pub struct Rectangle {
    base: ElementBase,
    thickness: i32,
    filler: char,
    pattern: Pattern,
}

impl Rectangle {
    /// A filled rectangle; both dimensions must be at least 1.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Result<Self, UiError> {
        Self::with_thickness(x, y, width, height, 0)
    }

    /// A rectangle with a border thickness. Invalid thickness values fall
    /// back to 0 (full fill).
    pub fn with_thickness(
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        thickness: i32,
    ) -> Result<Self, UiError> {
        if width < 1 {
            return Err(UiError::range("width"));
        }
        if height < 1 {
            return Err(UiError::range("height"));
        }

        let mut rectangle = Self {
            base: ElementBase::at(x, y, width, height),
            thickness: 0,
            filler: Symbol::INVISIBLE,
            pattern: Pattern::empty(),
        };
        rectangle.thickness = rectangle.checked_thickness(thickness);
        rectangle.rebake();
        Ok(rectangle)
    }

    /// The border thickness, 0 meaning full fill.
    pub fn thickness(&self) -> i32 {
        self.thickness
    }

    /// Set the border thickness.
    ///
    /// A thickness that is negative or would not leave an interior
    /// (`>= (width + 1) / 2` or `>= (height + 1) / 2`) silently resets to 0
    /// rather than erroring.
    pub fn set_thickness(&mut self, value: i32) {
        let value = self.checked_thickness(value);
        if self.thickness == value {
            return;
        }
        self.thickness = value;
        self.property_changed(Property::Other);
    }

    /// The fill character.
    pub fn filler(&self) -> char {
        self.filler
    }

    /// Set the fill character.
    pub fn set_filler(&mut self, value: char) {
        if self.filler == value {
            return;
        }
        self.filler = value;
        self.property_changed(Property::Other);
    }

    fn checked_thickness(&self, value: i32) -> i32 {
        if value < 0 || value >= (self.width() + 1) / 2 || value >= (self.height() + 1) / 2 {
            0
        } else {
            value
        }
    }

    fn build_pattern(&self) -> Result<Pattern, UiError> {
        let mut builder = PatternBuilder::new(self.width(), self.height())?;
        builder.rect(
            0,
            0,
            self.width(),
            self.height(),
            Symbol::new(self.filler, self.background(), self.foreground()),
        )?;

        if self.thickness > 0 {
            builder.rect(
                self.thickness,
                self.thickness,
                self.width() - self.thickness * 2,
                self.height() - self.thickness * 2,
                Symbol::new(Symbol::INVISIBLE, self.background(), self.foreground()),
            )?;
        }

        Ok(builder.create())
    }

    fn rebake(&mut self) {
        self.pattern = self.build_pattern().unwrap_or_else(|_| Pattern::empty());
    }

    #[cfg(test)]
    pub(crate) fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

impl Element for Rectangle {
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

impl Layoutable for Rectangle {
    crate::element::element_geometry!();
}

// =============================================================================
// Tests
// =============================================================================
