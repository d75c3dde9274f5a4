//! # weft-tui
//!
//! Retained-mode terminal UI toolkit with double-buffered diff rendering.
//!
//! Widgets (labels, buttons, rectangles, rotating selectors) live on a
//! [`View`], bake their appearance into immutable [`Pattern`]s, and draw
//! into the view's double-buffered [`ScreenBuffer`]; only cells that changed
//! since the last flush reach the physical console.
//!
//! ## Architecture
//!
//! ```text
//! key event -> InputCatcher -> View routing -> widget mutation
//!     -> change queue -> redraw (patterns into ScreenBuffer)
//!     -> diff against last-drawn grid -> changed cells to the Console
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `Symbol`, `Color` and the alignment enums
//! - [`pattern`] - immutable symbol grids and their builder
//! - [`text`] - the shared text row-layout helper
//! - [`renderer`] - the double-buffered grid and console backends
//! - [`element`] - widget capability traits and the concrete widgets
//! - [`layout`] - linear and grid layout groups
//! - [`input`] - key classification into semantic input flags
//! - [`view`] - element composition, selection, flush pacing
//! - [`hub`] - the single-owner host loop over named views

pub mod element;
pub mod error;
pub mod hub;
pub mod input;
pub mod layout;
pub mod pattern;
pub mod renderer;
pub mod text;
pub mod types;
pub mod view;

pub use types::{AlignmentHorizontal, AlignmentVertical, Color, Symbol};

pub use error::UiError;

pub use pattern::{Pattern, PatternBuilder};

pub use text::TextStyle;

pub use renderer::{CaptureConsole, Console, CrosstermConsole, ScreenBuffer};

pub use element::{
    Button, ChangeQueue, ChangeRecord, Element, ElementBase, ElementId, Interactive,
    InteractiveBase, Label, Layoutable, Property, Rectangle, RotoItem, RotoList, SharedElement,
    SharedLayoutable, TextContent, TextElement,
};

pub use layout::{Container, ElementGrid, ElementList};

pub use input::{InputCatcher, InputEvent, InputKind, KeyCode, KeyCombo, KeyEvent, KeyModifiers};

pub use view::View;

pub use hub::{Hub, HubStopper};
