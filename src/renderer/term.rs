//! Crossterm console backend.
//!
//! Queues one `MoveTo` + color pair + `Print` per cell on a buffered stdout
//! and performs a single real write per frame when the buffer flushes.
//! Construction switches the terminal into raw mode and hides the cursor;
//! both are restored on drop. Anything beyond that (window size, saved
//! titles) stays a host concern.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{cursor, queue, style, terminal};

use crate::renderer::console::Console;
use crate::types::{Color, Symbol};

impl From<Color> for style::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => style::Color::Black,
            Color::Red => style::Color::DarkRed,
            Color::Green => style::Color::DarkGreen,
            Color::Yellow => style::Color::DarkYellow,
            Color::Blue => style::Color::DarkBlue,
            Color::Magenta => style::Color::DarkMagenta,
            Color::Cyan => style::Color::DarkCyan,
            Color::White => style::Color::Grey,
            Color::BrightBlack => style::Color::DarkGrey,
            Color::BrightRed => style::Color::Red,
            Color::BrightGreen => style::Color::Green,
            Color::BrightYellow => style::Color::Yellow,
            Color::BrightBlue => style::Color::Blue,
            Color::BrightMagenta => style::Color::Magenta,
            Color::BrightCyan => style::Color::Cyan,
            Color::BrightWhite => style::Color::White,
        }
    }
}

/// Terminal-backed [`Console`] implementation.
pub struct CrosstermConsole {
    out: BufWriter<Stdout>,
}

impl CrosstermConsole {
    /// Take over the terminal: raw mode on, cursor hidden.
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;

        let mut out = BufWriter::new(io::stdout());
        queue!(out, cursor::Hide)?;
        out.flush()?;

        Ok(Self { out })
    }
}

impl Console for CrosstermConsole {
    fn put(&mut self, x: i32, y: i32, symbol: Symbol) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(x as u16, y as u16),
            style::SetBackgroundColor(symbol.background.into()),
            style::SetForegroundColor(symbol.foreground.into()),
            style::Print(symbol.character),
        )
    }

    fn park_cursor(&mut self, x: i32, y: i32) -> io::Result<()> {
        queue!(self.out, cursor::MoveTo(x as u16, y as u16))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn base_row(&mut self) -> io::Result<i32> {
        cursor::position().map(|(_, row)| i32::from(row))
    }

    fn set_title(&mut self, title: &str) -> io::Result<()> {
        queue!(self.out, terminal::SetTitle(title))?;
        self.out.flush()
    }
}

impl Drop for CrosstermConsole {
    fn drop(&mut self) {
        // Best effort: the terminal may already be gone.
        let _ = queue!(self.out, style::ResetColor, cursor::Show);
        let _ = self.out.flush();
        let _ = terminal::disable_raw_mode();
    }
}
