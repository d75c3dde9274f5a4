//! Terminal renderer - console abstraction and the double-buffered grid.
//!
//! The renderer owns no widgets and knows nothing about focus or layout; it
//! is the bottom of the pipeline. [`ScreenBuffer`] accumulates drawing into a
//! `current` grid and, on demand, diffs against the `last_drawn` grid so only
//! changed cells reach the physical console. [`Console`] is the seam to the
//! host's character-cell display; [`CrosstermConsole`] is the shipped
//! terminal backend and [`CaptureConsole`] the in-memory test double.

pub mod buffer;
pub mod console;
pub mod term;

pub use buffer::ScreenBuffer;
pub use console::{CaptureConsole, Console};
pub use term::CrosstermConsole;
