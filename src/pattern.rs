//! Pattern - an immutable rectangular grid of symbols.
//!
//! Widgets never draw characters one by one; they bake their appearance into
//! a [`Pattern`] once per change and blit it as a unit. Patterns are built
//! through [`PatternBuilder`], which validates every write against the
//! staging grid, and sealed by [`PatternBuilder::create`], which deep-copies
//! the staging cells. A pattern is replaced wholesale whenever a widget's
//! appearance changes; it is never mutated in place.

use crate::error::UiError;
use crate::types::{Color, Symbol};

// =============================================================================
// Pattern
// =============================================================================

/// An immutable `width x height` grid of [`Symbol`]s.
///
/// Cells that were never written stay the transparent zero value, so unwritten
/// regions of a pattern do not overwrite the destination when blitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    width: i32,
    height: i32,
    cells: Vec<Symbol>,
}

impl Pattern {
    /// The zero-sized pattern, used by degenerate widgets.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
        }
    }

    /// The width of this pattern.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// The height of this pattern.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The symbol at the given coordinates, or `None` out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<Symbol> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return None;
        }
        Some(self.cells[(y * self.width + x) as usize])
    }
}

// =============================================================================
// PatternBuilder
// =============================================================================

/// Builds [`Pattern`]s against a mutable staging grid.
///
/// Every operation validates its coordinates before writing; a rejected call
/// leaves the staging grid untouched, so the builder stays valid for further
/// calls. Operations return `&mut Self` on success and chain with `?`.
///
/// [`create`](Self::create) copies rather than transfers the staging grid:
/// the builder can keep producing independent snapshots.
#[derive(Debug)]
pub struct PatternBuilder {
    width: i32,
    height: i32,
    cells: Vec<Symbol>,
}

impl PatternBuilder {
    /// Create a builder for a `width x height` pattern.
    ///
    /// Both dimensions must be at least 1.
    pub fn new(width: i32, height: i32) -> Result<Self, UiError> {
        if width < 1 {
            return Err(UiError::range("width"));
        }
        if height < 1 {
            return Err(UiError::range("height"));
        }

        Ok(Self {
            width,
            height,
            cells: vec![Symbol::default(); (width * height) as usize],
        })
    }

    /// Write a run of symbols left to right starting at `(x, y)`.
    ///
    /// Fails if `(x, y)` is out of bounds or the run overflows the row.
    /// An empty run is a no-op.
    pub fn add_symbols(&mut self, x: i32, y: i32, symbols: &[Symbol]) -> Result<&mut Self, UiError> {
        self.check_origin(x, y)?;

        if symbols.is_empty() {
            return Ok(self);
        }

        if x + symbols.len() as i32 > self.width {
            return Err(UiError::range("symbols"));
        }

        let start = (y * self.width + x) as usize;
        self.cells[start..start + symbols.len()].copy_from_slice(symbols);

        Ok(self)
    }

    /// Write a string with the given colors starting at `(x, y)`.
    ///
    /// Each character becomes one symbol. Fails if `(x, y)` is out of bounds
    /// or the text overflows the row. Empty text is a no-op.
    pub fn add_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        background: Color,
        foreground: Color,
    ) -> Result<&mut Self, UiError> {
        self.check_origin(x, y)?;

        let len = text.chars().count() as i32;
        if len == 0 {
            return Ok(self);
        }

        if x + len > self.width {
            return Err(UiError::range("text"));
        }

        let start = (y * self.width + x) as usize;
        for (i, character) in text.chars().enumerate() {
            self.cells[start + i] = Symbol::new(character, background, foreground);
        }

        Ok(self)
    }

    /// Fill a sub-rectangle with `filler`.
    ///
    /// The rectangle must fit entirely inside the pattern. Transparent
    /// fillers are written like any other symbol: the builder fills a fresh
    /// staging area, so transparency here is content, not a skip rule.
    pub fn rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        filler: Symbol,
    ) -> Result<&mut Self, UiError> {
        self.check_origin(x, y)?;

        if width < 1 || x + width > self.width {
            return Err(UiError::range("width"));
        }
        if height < 1 || y + height > self.height {
            return Err(UiError::range("height"));
        }

        for row in y..y + height {
            let start = (row * self.width + x) as usize;
            for cell in &mut self.cells[start..start + width as usize] {
                *cell = filler;
            }
        }

        Ok(self)
    }

    /// Snapshot the current staging grid into a new [`Pattern`].
    pub fn create(&self) -> Pattern {
        Pattern {
            width: self.width,
            height: self.height,
            cells: self.cells.clone(),
        }
    }

    fn check_origin(&self, x: i32, y: i32) -> Result<(), UiError> {
        if x < 0 || x >= self.width {
            return Err(UiError::range("x"));
        }
        if y < 0 || y >= self.height {
            return Err(UiError::range("y"));
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
