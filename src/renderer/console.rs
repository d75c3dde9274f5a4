//! Console abstraction.
//!
//! The host supplies the physical character-cell display; the toolkit only
//! needs four operations from it. Keeping this a trait lets the buffer diff
//! logic run against an in-memory recorder in tests and against crossterm in
//! production.

use std::io;

use crate::types::Symbol;

/// A character-cell display the toolkit can flush to.
///
/// Implementations are expected to be cheap per [`put`](Self::put) and to
/// defer real I/O until [`flush`](Self::flush); the buffer flushes once per
/// frame.
pub trait Console {
    /// Write one symbol at the absolute cell `(x, y)`.
    fn put(&mut self, x: i32, y: i32, symbol: Symbol) -> io::Result<()>;

    /// Park the cursor at `(x, y)` after a frame.
    fn park_cursor(&mut self, x: i32, y: i32) -> io::Result<()>;

    /// Push buffered output to the display.
    fn flush(&mut self) -> io::Result<()>;

    /// The row at which a hub viewport starts.
    fn base_row(&mut self) -> io::Result<i32> {
        Ok(0)
    }

    /// Set the display title, where the host supports one.
    fn set_title(&mut self, _title: &str) -> io::Result<()> {
        Ok(())
    }
}

/// In-memory console that records every write.
///
/// Used by the buffer and view tests to observe exactly which cells a flush
/// touched; also handy for host-side golden tests.
#[derive(Debug, Default)]
pub struct CaptureConsole {
    writes: Vec<(i32, i32, Symbol)>,
    parked: Option<(i32, i32)>,
    flushes: usize,
}

impl CaptureConsole {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every cell write since the last [`clear`](Self::clear), in order.
    pub fn writes(&self) -> &[(i32, i32, Symbol)] {
        &self.writes
    }

    /// The last written symbol at `(x, y)`, if any write touched it.
    pub fn cell(&self, x: i32, y: i32) -> Option<Symbol> {
        self.writes
            .iter()
            .rev()
            .find(|(wx, wy, _)| *wx == x && *wy == y)
            .map(|(_, _, symbol)| *symbol)
    }

    /// Where the cursor was last parked, if anywhere.
    pub fn parked(&self) -> Option<(i32, i32)> {
        self.parked
    }

    /// How many times [`Console::flush`] ran.
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    /// Forget all recorded writes.
    pub fn clear(&mut self) {
        self.writes.clear();
        self.parked = None;
    }
}

impl Console for CaptureConsole {
    fn put(&mut self, x: i32, y: i32, symbol: Symbol) -> io::Result<()> {
        self.writes.push((x, y, symbol));
        Ok(())
    }

    fn park_cursor(&mut self, x: i32, y: i32) -> io::Result<()> {
        self.parked = Some((x, y));
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}
