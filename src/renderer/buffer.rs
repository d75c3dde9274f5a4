//! Double-buffered screen grid.
//!
//! The ScreenBuffer keeps two same-sized symbol grids: `current` (what should
//! be shown) and `last_drawn` (what the physical console already displays).
//! Drawing primitives write only into `current`, clipped to the buffer and
//! skipping transparent symbols. [`ScreenBuffer::draw`] compares the grids
//! and emits only changed cells, which keeps terminal I/O proportional to
//! what actually changed between frames.
//!
//! # Invariant
//!
//! A cell is physically written if and only if `full_redraw` is true or its
//! value differs from the last physically written value.

use std::io;
use std::sync::{Mutex, PoisonError};

use crate::error::UiError;
use crate::pattern::Pattern;
use crate::renderer::console::Console;
use crate::types::Symbol;

struct Grids {
    current: Vec<Symbol>,
    last_drawn: Vec<Symbol>,
}

/// The double-buffered character grid backing one view's on-screen region.
///
/// All mutating operations take `&self`: the two grids live behind a single
/// mutex, held per operation and never across a frame. The lock defends
/// against a host that draws from a second thread (for example a timer
/// callback) while the main loop flushes.
pub struct ScreenBuffer {
    top: i32,
    left: i32,
    width: i32,
    height: i32,
    grids: Mutex<Grids>,
}

impl ScreenBuffer {
    /// Create a buffer of `width x height` cells starting at console row
    /// `top`. Negative values are rejected.
    pub fn new(top: i32, width: i32, height: i32) -> Result<Self, UiError> {
        if top < 0 {
            return Err(UiError::range("top"));
        }
        if width < 0 {
            return Err(UiError::range("width"));
        }
        if height < 0 {
            return Err(UiError::range("height"));
        }

        let cells = (width * height) as usize;
        Ok(Self {
            top,
            left: 0,
            width,
            height,
            grids: Mutex::new(Grids {
                current: vec![Symbol::default(); cells],
                last_drawn: vec![Symbol::default(); cells],
            }),
        })
    }

    /// The buffer width in cells.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// The buffer height in cells.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Fill a rectangle with `symbol`, clipped to the buffer.
    ///
    /// A transparent symbol makes the whole call a no-op: transparent means
    /// "do not overwrite".
    pub fn rect(&self, x: i32, y: i32, width: i32, height: i32, symbol: Symbol) {
        if symbol.is_transparent() {
            return;
        }

        let x_limit = (x + width).min(self.width);
        let y_limit = (y + height).min(self.height);

        let mut grids = self.lock();
        for row in y.max(0)..y_limit {
            for col in x.max(0)..x_limit {
                grids.current[(row * self.width + col) as usize] = symbol;
            }
        }
    }

    /// Blit a pattern with its top-left corner at `(x, y)`.
    ///
    /// Non-transparent cells overwrite the destination; transparent cells
    /// leave it untouched. Negative offsets are allowed and clip the source.
    pub fn pattern(&self, x: i32, y: i32, pattern: &Pattern) {
        let x_limit = (x + pattern.width()).min(self.width);
        let y_limit = (y + pattern.height()).min(self.height);

        let mut grids = self.lock();
        for row in y.max(0)..y_limit {
            for col in x.max(0)..x_limit {
                if let Some(symbol) = pattern.get(col - x, row - y) {
                    if !symbol.is_transparent() {
                        grids.current[(row * self.width + col) as usize] = symbol;
                    }
                }
            }
        }
    }

    /// Write a run of symbols into row `y` starting at column `x`.
    ///
    /// No-ops when the run is empty or `y` is outside the buffer; clips
    /// horizontally and skips transparent symbols.
    pub fn symbols(&self, x: i32, y: i32, symbols: &[Symbol]) {
        if symbols.is_empty() {
            return;
        }
        if y < 0 || y >= self.height {
            return;
        }

        let x_limit = (x + symbols.len() as i32).min(self.width);

        let mut grids = self.lock();
        for col in x.max(0)..x_limit {
            let symbol = symbols[(col - x) as usize];
            if !symbol.is_transparent() {
                grids.current[(y * self.width + col) as usize] = symbol;
            }
        }
    }

    /// Fill every cell with `filler`, including transparent fillers.
    pub fn clear(&self, filler: Symbol) {
        let mut grids = self.lock();
        for cell in grids.current.iter_mut() {
            *cell = filler;
        }
    }

    /// Flush the buffer to `console`.
    ///
    /// With `full_redraw` false only cells differing from `last_drawn` are
    /// written; either way every written cell is copied into `last_drawn`.
    /// The cursor is parked at the buffer origin and the console flushed
    /// once.
    pub fn draw(&self, full_redraw: bool, console: &mut dyn Console) -> io::Result<()> {
        let mut grids = self.lock();
        let grids = &mut *grids;

        for y in 0..self.height {
            for x in 0..self.width {
                let index = (y * self.width + x) as usize;
                let symbol = grids.current[index];
                if !full_redraw && symbol == grids.last_drawn[index] {
                    continue;
                }

                grids.last_drawn[index] = symbol;
                console.put(self.left + x, self.top + y, symbol)?;
            }
        }

        console.park_cursor(self.left, self.top)?;
        console.flush()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Grids> {
        // Grid contents are plain symbol data; a poisoned lock still holds a
        // usable grid.
        self.grids.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::PatternBuilder;
    use crate::renderer::console::CaptureConsole;
    use crate::types::Color;

    fn symbol(character: char) -> Symbol {
        Symbol::new(character, Color::Black, Color::White)
    }

    #[test]
    fn test_new_rejects_negative_dimensions() {
        assert!(matches!(
            ScreenBuffer::new(-1, 1, 1),
            Err(UiError::Range { .. })
        ));
        assert!(matches!(
            ScreenBuffer::new(0, -1, 1),
            Err(UiError::Range { .. })
        ));
        assert!(matches!(
            ScreenBuffer::new(0, 1, -1),
            Err(UiError::Range { .. })
        ));
    }

    #[test]
    fn test_rect_clipped_and_flushed() {
        let buffer = ScreenBuffer::new(0, 4, 3).unwrap();
        buffer.rect(2, 1, 5, 5, symbol('R'));

        let mut console = CaptureConsole::new();
        buffer.draw(false, &mut console).unwrap();

        // Only the clipped 2x2 corner was ever written.
        assert_eq!(console.cell(2, 1), Some(symbol('R')));
        assert_eq!(console.cell(3, 2), Some(symbol('R')));
        assert_eq!(console.writes().len(), 4);
    }

    #[test]
    fn test_transparent_rect_is_noop() {
        let buffer = ScreenBuffer::new(0, 2, 2).unwrap();
        buffer.rect(0, 0, 2, 2, Symbol::transparent());

        let mut console = CaptureConsole::new();
        buffer.draw(false, &mut console).unwrap();
        assert!(console.writes().is_empty());
    }

    #[test]
    fn test_pattern_blit_skips_transparent_cells() {
        let buffer = ScreenBuffer::new(0, 3, 1).unwrap();
        buffer.rect(0, 0, 3, 1, symbol('.'));

        let mut builder = PatternBuilder::new(3, 1).unwrap();
        builder
            .add_symbols(1, 0, &[symbol('x')])
            .unwrap();
        buffer.pattern(0, 0, &builder.create());

        let mut console = CaptureConsole::new();
        buffer.draw(false, &mut console).unwrap();

        assert_eq!(console.cell(0, 0), Some(symbol('.')));
        assert_eq!(console.cell(1, 0), Some(symbol('x')));
        assert_eq!(console.cell(2, 0), Some(symbol('.')));
    }

    #[test]
    fn test_pattern_negative_offset_clips_source() {
        let buffer = ScreenBuffer::new(0, 2, 2).unwrap();

        let mut builder = PatternBuilder::new(2, 2).unwrap();
        builder.add_text(0, 0, "ab", Color::Black, Color::White).unwrap();
        builder.add_text(0, 1, "cd", Color::Black, Color::White).unwrap();
        buffer.pattern(-1, -1, &builder.create());

        let mut console = CaptureConsole::new();
        buffer.draw(false, &mut console).unwrap();

        // Source row 1 / column 1 lands at the buffer origin.
        assert_eq!(console.writes().len(), 1);
        assert_eq!(console.cell(0, 0).unwrap().character, 'd');
    }

    #[test]
    fn test_symbols_row_bounds() {
        let buffer = ScreenBuffer::new(0, 3, 2).unwrap();

        buffer.symbols(0, 5, &[symbol('x')]);
        buffer.symbols(0, -1, &[symbol('x')]);
        buffer.symbols(2, 0, &[symbol('l'), symbol('L')]);
        buffer.symbols(0, 1, &[]);

        let mut console = CaptureConsole::new();
        buffer.draw(false, &mut console).unwrap();

        assert_eq!(console.writes().len(), 1);
        assert_eq!(console.cell(2, 0), Some(symbol('l')));
    }

    #[test]
    fn test_draw_writes_only_changes() {
        let buffer = ScreenBuffer::new(0, 3, 1).unwrap();
        buffer.symbols(0, 0, &[symbol('a'), symbol('b'), symbol('c')]);

        let mut console = CaptureConsole::new();
        buffer.draw(false, &mut console).unwrap();
        assert_eq!(console.writes().len(), 3);

        // Nothing changed: the second pass writes zero cells but still parks
        // the cursor and flushes.
        console.clear();
        buffer.draw(false, &mut console).unwrap();
        assert!(console.writes().is_empty());
        assert_eq!(console.parked(), Some((0, 0)));
        assert_eq!(console.flushes(), 2);

        // One cell changed: exactly one write.
        buffer.symbols(1, 0, &[symbol('B')]);
        console.clear();
        buffer.draw(false, &mut console).unwrap();
        assert_eq!(console.writes().len(), 1);
        assert_eq!(console.cell(1, 0), Some(symbol('B')));
    }

    #[test]
    fn test_full_redraw_writes_every_cell() {
        let buffer = ScreenBuffer::new(0, 2, 2).unwrap();
        buffer.clear(symbol(' '));

        let mut console = CaptureConsole::new();
        buffer.draw(false, &mut console).unwrap();
        console.clear();

        buffer.draw(true, &mut console).unwrap();
        assert_eq!(console.writes().len(), 4);
    }

    #[test]
    fn test_top_offsets_console_rows() {
        let buffer = ScreenBuffer::new(5, 1, 1).unwrap();
        buffer.symbols(0, 0, &[symbol('x')]);

        let mut console = CaptureConsole::new();
        buffer.draw(false, &mut console).unwrap();
        assert_eq!(console.cell(0, 5), Some(symbol('x')));
    }
}
