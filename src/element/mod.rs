//! Widget capability traits and shared element state.
//!
//! The widget model is capability-based rather than a fixed inheritance
//! chain:
//!
//! - [`Layoutable`] - has a position and size; the only surface layout
//!   groups need.
//! - [`Element`] - drawable: owns an [`ElementBase`], renders a pattern into
//!   a buffer, and participates in dirty tracking.
//! - [`Interactive`] - focusable: can be selected, carries a tab index, and
//!   may consume routed input.
//! - [`TextElement`] - displays a text block laid out by [`crate::text`].
//!
//! Every observable-property setter follows one state machine: an actual
//! value change marks the element dirty, invokes the widget's
//! [`Element::on_property_changed`] hook, and pushes a [`ChangeRecord`] into
//! the owning view's change queue. A widget has at most one owning view;
//! attaching a second owner is an error. Position-only changes (`X`, `Y`)
//! must not regenerate patterns - every concrete widget treats them as a
//! cheap move and rebakes its pattern for anything else.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::UiError;
use crate::input::InputEvent;
use crate::pattern::{Pattern, PatternBuilder};
use crate::renderer::ScreenBuffer;
use crate::text::TextStyle;
use crate::types::{AlignmentHorizontal, AlignmentVertical, Color};

mod button;
mod label;
mod rectangle;
mod roto_list;

pub use button::Button;
pub use label::Label;
pub use rectangle::Rectangle;
pub use roto_list::{RotoItem, RotoList};

/// Shared handle to a drawable element.
pub type SharedElement = Rc<RefCell<dyn Element>>;

/// Shared handle to anything a layout group can position.
pub type SharedLayoutable = Rc<RefCell<dyn Layoutable>>;

/// Identity comparison for shared handles (same allocation, ignoring the
/// vtable half of the fat pointer).
pub(crate) fn same_target<A: ?Sized, B: ?Sized>(a: &Rc<RefCell<A>>, b: &Rc<RefCell<B>>) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

// =============================================================================
// Change propagation
// =============================================================================

/// Which observable property changed.
///
/// The tag replaces caller-name reflection: widgets branch on it to decide
/// whether a pattern rebake is needed, and views only need to know that the
/// element changed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    X,
    Y,
    Width,
    Height,
    /// Any non-geometry property (colors, text, visibility, selection, ...).
    Other,
}

impl Property {
    /// Position-only changes move a pattern without rebaking it.
    pub fn is_position(self) -> bool {
        matches!(self, Property::X | Property::Y)
    }
}

/// Identifier a view assigns to each element it owns.
pub type ElementId = u64;

/// One queued "this element changed" notification.
#[derive(Debug, Clone, Copy)]
pub struct ChangeRecord {
    /// The view-assigned id of the element that changed.
    pub element: ElementId,
    /// What changed.
    pub property: Property,
}

/// The change queue a view shares with its elements.
///
/// Widgets push records from their setters; the owning view drains the queue
/// once per host tick and redraws. Explicit message passing instead of
/// callback subscriptions keeps fan-out unambiguous: one queue, one owner.
#[derive(Debug, Clone, Default)]
pub struct ChangeQueue {
    records: Rc<RefCell<Vec<ChangeRecord>>>,
}

impl ChangeQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn push(&self, record: ChangeRecord) {
        self.records.borrow_mut().push(record);
    }

    /// Take every queued record, leaving the queue empty.
    pub fn drain(&self) -> Vec<ChangeRecord> {
        std::mem::take(&mut *self.records.borrow_mut())
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

#[derive(Debug, Clone)]
struct Owner {
    id: ElementId,
    queue: ChangeQueue,
}

// =============================================================================
// ElementBase
// =============================================================================

/// The state every element carries: geometry, colors, visibility, the dirty
/// flag, and the (at most one) owning view's change sink.
#[derive(Debug)]
pub struct ElementBase {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    background: Color,
    foreground: Color,
    visible: bool,
    dirty: bool,
    owner: Option<Owner>,
}

impl ElementBase {
    /// Create element state; width and height must be non-negative.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Result<Self, UiError> {
        if width < 0 {
            return Err(UiError::range("width"));
        }
        if height < 0 {
            return Err(UiError::range("height"));
        }
        Ok(Self::at(x, y, width, height))
    }

    /// Internal constructor for callers that already guarantee non-negative
    /// dimensions (e.g. after clamping).
    pub(crate) fn at(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            background: Color::Black,
            foreground: Color::White,
            visible: true,
            dirty: true,
            owner: None,
        }
    }

    /// Attach the owning view's change sink. Fails if another view already
    /// owns this element.
    pub(crate) fn attach_owner(&mut self, id: ElementId, queue: ChangeQueue) -> Result<(), UiError> {
        if self.owner.is_some() {
            return Err(UiError::AlreadyOwned);
        }
        self.owner = Some(Owner { id, queue });
        Ok(())
    }

    /// Detach from the owning view.
    pub(crate) fn detach_owner(&mut self) {
        self.owner = None;
    }

    fn notify(&self, property: Property) {
        if let Some(owner) = &self.owner {
            owner.queue.push(ChangeRecord {
                element: owner.id,
                property,
            });
        }
    }
}

// =============================================================================
// Layoutable
// =============================================================================

/// Basic geometry every layout participant exposes.
///
/// Layout groups position children through this trait alone; whether the
/// child is a widget or a nested group is irrelevant to them. The toolkit
/// never clamps geometry to a container - groups reposition children but a
/// child may extend outside its group's reported bounds.
pub trait Layoutable {
    /// The X coordinate.
    fn x(&self) -> i32;
    /// The Y coordinate.
    fn y(&self) -> i32;
    /// The width.
    fn width(&self) -> i32;
    /// The height.
    fn height(&self) -> i32;
    /// Set the X coordinate.
    fn set_x(&mut self, value: i32);
    /// Set the Y coordinate.
    fn set_y(&mut self, value: i32);
    /// Set the width.
    fn set_width(&mut self, value: i32);
    /// Set the height.
    fn set_height(&mut self, value: i32);
}

/// Implements [`Layoutable`] for an [`Element`] type by routing geometry
/// through the shared change machinery.
macro_rules! element_geometry {
    () => {
        fn x(&self) -> i32 {
            self.base().x
        }

        fn y(&self) -> i32 {
            self.base().y
        }

        fn width(&self) -> i32 {
            self.base().width
        }

        fn height(&self) -> i32 {
            self.base().height
        }

        fn set_x(&mut self, value: i32) {
            if self.base().x == value {
                return;
            }
            self.base_mut().x = value;
            self.property_changed($crate::element::Property::X);
        }

        fn set_y(&mut self, value: i32) {
            if self.base().y == value {
                return;
            }
            self.base_mut().y = value;
            self.property_changed($crate::element::Property::Y);
        }

        fn set_width(&mut self, value: i32) {
            if self.base().width == value {
                return;
            }
            self.base_mut().width = value;
            self.property_changed($crate::element::Property::Width);
        }

        fn set_height(&mut self, value: i32) {
            if self.base().height == value {
                return;
            }
            self.base_mut().height = value;
            self.property_changed($crate::element::Property::Height);
        }
    };
}

pub(crate) use element_geometry;

// =============================================================================
// Element
// =============================================================================

/// A positioned, sized, drawable UI unit.
///
/// Concrete widgets supply the two base accessors plus a [`render`] hook
/// that blits their current pattern; everything else is provided. The dirty
/// state machine: any observable-property change flips `dirty` on, drawing
/// flips it off.
///
/// [`render`]: Element::render
pub trait Element {
    /// Shared element state.
    fn base(&self) -> &ElementBase;

    /// Shared element state, mutably.
    fn base_mut(&mut self) -> &mut ElementBase;

    /// Draw this element's current appearance into the buffer at its own
    /// position. Called through [`draw`](Element::draw), which clears the
    /// dirty flag first.
    fn render(&self, buffer: &ScreenBuffer);

    /// Hook invoked on every actual property change, after the dirty flag is
    /// set and before the owning view is notified. Position changes (`X`,
    /// `Y`) must not rebake patterns.
    fn on_property_changed(&mut self, _property: Property) {}

    /// Focusable capability query; interactive widgets return themselves.
    fn as_interactive(&mut self) -> Option<&mut dyn Interactive> {
        None
    }

    /// The background color.
    fn background(&self) -> Color {
        self.base().background
    }

    /// Set the background color.
    fn set_background(&mut self, value: Color) {
        if self.base().background == value {
            return;
        }
        self.base_mut().background = value;
        self.property_changed(Property::Other);
    }

    /// The foreground color.
    fn foreground(&self) -> Color {
        self.base().foreground
    }

    /// Set the foreground color.
    fn set_foreground(&mut self, value: Color) {
        if self.base().foreground == value {
            return;
        }
        self.base_mut().foreground = value;
        self.property_changed(Property::Other);
    }

    /// Whether this element is drawn.
    fn visible(&self) -> bool {
        self.base().visible
    }

    /// Show or hide this element. An invisible element stays in its view;
    /// hiding is the only way to un-render it.
    fn set_visible(&mut self, value: bool) {
        if self.base().visible == value {
            return;
        }
        self.base_mut().visible = value;
        self.property_changed(Property::Other);
    }

    /// Whether this element changed since it was last drawn.
    fn is_dirty(&self) -> bool {
        self.base().dirty
    }

    /// Draw into the buffer, clearing the dirty flag.
    fn draw(&mut self, buffer: &ScreenBuffer) {
        self.base_mut().dirty = false;
        self.render(buffer);
    }

    /// Run the shared change machinery for an already-applied change.
    fn property_changed(&mut self, property: Property) {
        self.base_mut().dirty = true;
        self.on_property_changed(property);
        self.base().notify(property);
    }
}

// =============================================================================
// Interactive
// =============================================================================

/// The selection state an interactive element carries on top of
/// [`ElementBase`].
#[derive(Debug)]
pub struct InteractiveBase {
    enabled: bool,
    selected: bool,
    background_selected: Color,
    foreground_selected: Color,
    tab_index: i32,
}

impl Default for InteractiveBase {
    fn default() -> Self {
        Self {
            enabled: true,
            selected: false,
            background_selected: Color::White,
            foreground_selected: Color::Black,
            tab_index: 0,
        }
    }
}

impl InteractiveBase {
    /// Default interactive state: enabled, unselected, inverted palette.
    pub fn new() -> Self {
        Self::default()
    }
}

/// An element that can hold the view selection and consume routed input.
///
/// At most one interactive element per view is selected at a time; the view
/// enforces that, not the widget.
pub trait Interactive: Element {
    /// Shared interactive state.
    fn interactive_base(&self) -> &InteractiveBase;

    /// Shared interactive state, mutably.
    fn interactive_base_mut(&mut self) -> &mut InteractiveBase;

    /// Receive a routed input. Call [`InputEvent::consume`] to stop the view
    /// from also treating it as navigation.
    fn handle_input(&mut self, _event: &mut InputEvent) {}

    /// Whether this element takes part in selection cycling.
    fn enabled(&self) -> bool {
        self.interactive_base().enabled
    }

    /// Enable or disable selection of this element.
    fn set_enabled(&mut self, value: bool) {
        if self.interactive_base().enabled == value {
            return;
        }
        self.interactive_base_mut().enabled = value;
        self.property_changed(Property::Other);
    }

    /// Whether this element currently holds the view selection.
    fn selected(&self) -> bool {
        self.interactive_base().selected
    }

    /// Set the selection flag. Called by the owning view; application code
    /// selects through the view, which keeps selection exclusive.
    fn set_selected(&mut self, value: bool) {
        if self.interactive_base().selected == value {
            return;
        }
        self.interactive_base_mut().selected = value;
        self.property_changed(Property::Other);
    }

    /// Background color while selected.
    fn background_selected(&self) -> Color {
        self.interactive_base().background_selected
    }

    /// Set the background color used while selected.
    fn set_background_selected(&mut self, value: Color) {
        if self.interactive_base().background_selected == value {
            return;
        }
        self.interactive_base_mut().background_selected = value;
        self.property_changed(Property::Other);
    }

    /// Foreground color while selected.
    fn foreground_selected(&self) -> Color {
        self.interactive_base().foreground_selected
    }

    /// Set the foreground color used while selected.
    fn set_foreground_selected(&mut self, value: Color) {
        if self.interactive_base().foreground_selected == value {
            return;
        }
        self.interactive_base_mut().foreground_selected = value;
        self.property_changed(Property::Other);
    }

    /// The tab order key relative to the other elements of the view.
    fn tab_index(&self) -> i32 {
        self.interactive_base().tab_index
    }

    /// Set the tab order key. Plain state: changing it does not dirty the
    /// element.
    fn set_tab_index(&mut self, value: i32) {
        self.interactive_base_mut().tab_index = value;
    }
}

// =============================================================================
// TextElement
// =============================================================================

/// Text block state shared by the text-bearing widgets.
#[derive(Debug, Clone)]
pub struct TextContent {
    text: String,
    style: TextStyle,
}

impl TextContent {
    /// Content with the given text and style.
    pub fn new(text: &str, style: TextStyle) -> Self {
        Self {
            text: text.to_string(),
            style,
        }
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn style(&self) -> &TextStyle {
        &self.style
    }
}

/// An element displaying a laid-out text block.
pub trait TextElement: Element {
    /// The text block state.
    fn text_content(&self) -> &TextContent;

    /// The text block state, mutably.
    fn text_content_mut(&mut self) -> &mut TextContent;

    /// The displayed text.
    fn text(&self) -> &str {
        &self.text_content().text
    }

    /// Replace the displayed text.
    fn set_text(&mut self, value: &str) {
        if self.text_content().text == value {
            return;
        }
        self.text_content_mut().text = value.to_string();
        self.property_changed(Property::Other);
    }

    /// Horizontal text alignment.
    fn text_alignment_horizontal(&self) -> AlignmentHorizontal {
        self.text_content().style.horizontal
    }

    /// Set the horizontal text alignment.
    fn set_text_alignment_horizontal(&mut self, value: AlignmentHorizontal) {
        if self.text_content().style.horizontal == value {
            return;
        }
        self.text_content_mut().style.horizontal = value;
        self.property_changed(Property::Other);
    }

    /// Vertical text alignment.
    fn text_alignment_vertical(&self) -> AlignmentVertical {
        self.text_content().style.vertical
    }

    /// Set the vertical text alignment.
    fn set_text_alignment_vertical(&mut self, value: AlignmentVertical) {
        if self.text_content().style.vertical == value {
            return;
        }
        self.text_content_mut().style.vertical = value;
        self.property_changed(Property::Other);
    }

    /// The character used to pad the text block.
    fn filler(&self) -> char {
        self.text_content().style.filler
    }

    /// Set the padding character.
    fn set_filler(&mut self, value: char) {
        if self.text_content().style.filler == value {
            return;
        }
        self.text_content_mut().style.filler = value;
        self.property_changed(Property::Other);
    }

    /// Whether text wraps onto further rows.
    fn wrap_text(&self) -> bool {
        self.text_content().style.wrap
    }

    /// Enable or disable wrapping.
    fn set_wrap_text(&mut self, value: bool) {
        if self.text_content().style.wrap == value {
            return;
        }
        self.text_content_mut().style.wrap = value;
        self.property_changed(Property::Other);
    }
}

/// Bake laid-out rows into a pattern.
///
/// Row lengths always match `width` by construction, so failures cannot
/// occur for live widgets; degenerate geometry falls back to the empty
/// pattern.
pub(crate) fn bake_text_pattern(
    width: i32,
    height: i32,
    rows: &[String],
    background: Color,
    foreground: Color,
) -> Pattern {
    let Ok(mut builder) = PatternBuilder::new(width, height) else {
        return Pattern::empty();
    };

    for (row, text) in rows.iter().enumerate() {
        if builder.add_text(0, row as i32, text, background, foreground).is_err() {
            return Pattern::empty();
        }
    }

    builder.create()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        base: ElementBase,
        rebakes: usize,
    }

    impl Probe {
        fn new() -> Self {
            Self {
                base: ElementBase::at(0, 0, 2, 2),
                rebakes: 0,
            }
        }
    }

    impl Element for Probe {
        fn base(&self) -> &ElementBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ElementBase {
            &mut self.base
        }

        fn render(&self, _buffer: &ScreenBuffer) {}

        fn on_property_changed(&mut self, property: Property) {
            if !property.is_position() {
                self.rebakes += 1;
            }
        }
    }

    impl Layoutable for Probe {
        element_geometry!();
    }

    #[test]
    fn test_base_rejects_negative_size() {
        assert!(matches!(
            ElementBase::new(0, 0, -1, 0),
            Err(UiError::Range { .. })
        ));
        assert!(matches!(
            ElementBase::new(0, 0, 0, -1),
            Err(UiError::Range { .. })
        ));
    }

    #[test]
    fn test_dirty_state_machine() {
        let mut probe = Probe::new();
        assert!(probe.is_dirty());

        let buffer = ScreenBuffer::new(0, 4, 4).unwrap();
        probe.draw(&buffer);
        assert!(!probe.is_dirty());

        probe.set_x(3);
        assert!(probe.is_dirty());

        probe.draw(&buffer);
        probe.set_background(Color::Blue);
        assert!(probe.is_dirty());
    }

    #[test]
    fn test_same_value_write_is_silent() {
        let mut probe = Probe::new();
        let buffer = ScreenBuffer::new(0, 4, 4).unwrap();
        probe.draw(&buffer);

        probe.set_x(0);
        probe.set_visible(true);
        assert!(!probe.is_dirty());
        assert_eq!(probe.rebakes, 0);
    }

    #[test]
    fn test_position_changes_skip_rebake() {
        let mut probe = Probe::new();
        probe.set_x(5);
        probe.set_y(7);
        assert_eq!(probe.rebakes, 0);

        probe.set_width(9);
        probe.set_foreground(Color::Red);
        assert_eq!(probe.rebakes, 2);
    }

    #[test]
    fn test_change_records_flow_to_queue() {
        let mut probe = Probe::new();
        let queue = ChangeQueue::new();
        probe.base_mut().attach_owner(7, queue.clone()).unwrap();

        probe.set_x(1);
        probe.set_height(5);

        let records = queue.drain();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].element, 7);
        assert_eq!(records[0].property, Property::X);
        assert_eq!(records[1].property, Property::Height);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_single_owner() {
        let mut probe = Probe::new();
        probe.base_mut().attach_owner(1, ChangeQueue::new()).unwrap();

        assert!(matches!(
            probe.base_mut().attach_owner(2, ChangeQueue::new()),
            Err(UiError::AlreadyOwned)
        ));

        probe.base_mut().detach_owner();
        probe.base_mut().attach_owner(2, ChangeQueue::new()).unwrap();
    }

    #[test]
    fn test_same_target_identity() {
        let a: Rc<RefCell<Probe>> = Rc::new(RefCell::new(Probe::new()));
        let b: Rc<RefCell<Probe>> = Rc::new(RefCell::new(Probe::new()));
        let a_dyn: SharedElement = a.clone();

        assert!(same_target(&a, &a_dyn));
        assert!(!same_target(&b, &a_dyn));
    }
}
