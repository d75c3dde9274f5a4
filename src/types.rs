//! Core types for weft-tui.
//!
//! These types define the foundation that everything builds on: the 16-color
//! console palette, the [`Symbol`] cell value that flows through patterns and
//! buffers, and the alignment enums shared by text layout and the layout
//! groups.

// =============================================================================
// Color
// =============================================================================

/// Standard ANSI 16-color console palette.
///
/// A closed palette keeps [`Symbol`] a plain `Copy` value with exact
/// equality, which the diff renderer depends on. Terminal-capability
/// negotiation (extended palettes, true color) is a host concern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Color {
    #[default]
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

// =============================================================================
// Symbol
// =============================================================================

/// A single character cell: one glyph plus its background and foreground
/// colors.
///
/// Symbols are immutable values; a cell's content is replaced wholesale,
/// never edited in place. Equality is structural over all three fields and
/// drives the changed-cell diff in the screen buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Symbol {
    /// The character to display.
    pub character: char,
    /// The background color of the cell.
    pub background: Color,
    /// The foreground color of the cell.
    pub foreground: Color,
}

impl Symbol {
    /// The reserved character marking a transparent symbol.
    ///
    /// A symbol carrying this character never overwrites a destination cell
    /// during composition.
    pub const INVISIBLE: char = '\0';

    /// Create a new symbol.
    pub const fn new(character: char, background: Color, foreground: Color) -> Self {
        Self {
            character,
            background,
            foreground,
        }
    }

    /// A transparent symbol (the zero value).
    pub const fn transparent() -> Self {
        Self {
            character: Self::INVISIBLE,
            background: Color::Black,
            foreground: Color::Black,
        }
    }

    /// Whether this symbol is transparent and must not overwrite cells.
    pub const fn is_transparent(&self) -> bool {
        self.character == Self::INVISIBLE
    }
}

// =============================================================================
// Alignment
// =============================================================================

/// How content is aligned horizontally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlignmentHorizontal {
    /// Left to right.
    #[default]
    Left,
    /// Centered.
    Middle,
    /// Right to left.
    Right,
}

/// How content is aligned vertically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlignmentVertical {
    /// Top down.
    #[default]
    Top,
    /// Centered.
    Middle,
    /// Bottom up.
    Bottom,
}

// =============================================================================
// Tests
// =============================================================================
