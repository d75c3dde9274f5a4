//! View - one arrangement of elements tied to a console region.
//!
//! A view owns its screen buffer, the ordered list of top-level elements
//! placed on it, the single selected interactive element (if any), and a
//! tri-state pending-flush flag. Elements report changes into the view's
//! change queue; [`View::pump`] drains the queue, maintains the selection
//! invariant, and redraws. The host loop then calls [`View::draw_buffer`]
//! to flush at the pending level.
//!
//! # Redraw and flush
//!
//! [`View::redraw`] repaints the whole buffer: clear to the clearance
//! symbol, then draw every visible element in insertion order, so later
//! elements paint over earlier ones where they are not transparent. Each
//! redraw marks a pending flush; a redraw arriving while one is already
//! pending upgrades it to a full flush, and a pending full flush is never
//! downgraded.

use std::io;

use log::{debug, trace};

use crate::element::{ChangeQueue, Element, ElementId, Interactive, SharedElement, same_target};
use crate::error::UiError;
use crate::input::{InputEvent, InputKind};
use crate::renderer::{Console, ScreenBuffer};
use crate::types::Symbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingFlush {
    Partial,
    Full,
}

struct ViewSlot {
    id: ElementId,
    element: SharedElement,
}

/// A single arrangement of UI elements tied directly to a console region.
pub struct View {
    name: String,
    clearance: Symbol,
    buffer: ScreenBuffer,
    elements: Vec<ViewSlot>,
    selected: Option<ElementId>,
    queue: ChangeQueue,
    next_id: ElementId,
    pending: Option<PendingFlush>,
}

impl View {
    /// Create a view of `width x height` cells starting at console row
    /// `top`, cleared with `clearance`.
    pub fn new(
        name: &str,
        top: i32,
        width: i32,
        height: i32,
        clearance: Symbol,
    ) -> Result<Self, UiError> {
        Ok(Self {
            name: name.to_string(),
            clearance,
            buffer: ScreenBuffer::new(top, width, height)?,
            elements: Vec::new(),
            selected: None,
            queue: ChangeQueue::new(),
            next_id: 0,
            pending: None,
        })
    }

    /// The name this view is referenced by.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an element to this view.
    ///
    /// The element joins the draw order at the end, starts reporting its
    /// changes to this view, and is drawn immediately. Re-adding an element
    /// of this view is [`UiError::DuplicateElement`]; an element owned by
    /// another view is [`UiError::AlreadyOwned`].
    pub fn add_element(&mut self, element: SharedElement) -> Result<(), UiError> {
        if self
            .elements
            .iter()
            .any(|slot| same_target(&slot.element, &element))
        {
            return Err(UiError::DuplicateElement);
        }

        let id = self.next_id;
        element
            .borrow_mut()
            .base_mut()
            .attach_owner(id, self.queue.clone())?;
        self.next_id += 1;

        let dirty = element.borrow().is_dirty();
        self.elements.push(ViewSlot { id, element });

        if dirty {
            self.redraw();
        }
        Ok(())
    }

    /// Add several elements in order.
    pub fn add_elements(&mut self, elements: Vec<SharedElement>) -> Result<(), UiError> {
        for element in elements {
            self.add_element(element)?;
        }
        Ok(())
    }

    /// Remove an element from this view.
    ///
    /// Returns `false` if the element was not part of the view. Clears the
    /// selection if the removed element held it, and repaints.
    pub fn remove_element(&mut self, element: &SharedElement) -> bool {
        let Some(position) = self
            .elements
            .iter()
            .position(|slot| same_target(&slot.element, element))
        else {
            return false;
        };

        let slot = self.elements.remove(position);
        slot.element.borrow_mut().base_mut().detach_owner();

        if self.selected == Some(slot.id) {
            self.select(None);
        }
        self.redraw();
        true
    }

    /// Repaint every visible element into the buffer and mark a pending
    /// flush.
    pub fn redraw(&mut self) {
        trace!("view `{}`: redraw", self.name);
        self.buffer.clear(self.clearance);

        for slot in &self.elements {
            let mut element = slot.element.borrow_mut();
            if !element.visible() {
                continue;
            }
            element.draw(&self.buffer);
        }

        // Second redraw before a flush upgrades partial to full.
        self.pending = Some(match self.pending {
            None => PendingFlush::Partial,
            Some(_) => PendingFlush::Full,
        });
    }

    /// Request a flush of the buffer at the given level.
    ///
    /// A pending partial flush upgrades to full; a pending full flush never
    /// downgrades.
    pub fn refresh(&mut self, full_redraw: bool) {
        self.pending = Some(match (self.pending, full_redraw) {
            (None, false) => PendingFlush::Partial,
            (Some(PendingFlush::Partial), false) => PendingFlush::Partial,
            _ => PendingFlush::Full,
        });
    }

    /// Drain queued element changes: enforce the selection invariant and
    /// repaint if anything changed.
    pub fn pump(&mut self) {
        let records = self.queue.drain();
        if records.is_empty() {
            return;
        }

        if let Some(selected) = self.selected {
            if !self.is_selectable(selected) {
                debug!("view `{}`: selected element no longer selectable", self.name);
                self.select(None);
            }
        }

        self.redraw();
    }

    /// Flush the buffer to the console at the pending level, then clear the
    /// pending flag. No-op when nothing is pending.
    pub fn draw_buffer(&mut self, console: &mut dyn Console) -> io::Result<()> {
        let Some(level) = self.pending.take() else {
            return Ok(());
        };
        trace!("view `{}`: flush {:?}", self.name, level);
        self.buffer.draw(level == PendingFlush::Full, console)
    }

    /// Route one classified input through the view.
    ///
    /// The selected element sees the input first and may consume it;
    /// otherwise selection-up/-down inputs cycle the selection through the
    /// enabled, visible interactive elements in tab order.
    pub fn on_new_input(&mut self, event: &mut InputEvent) {
        if let Some(selected) = self.selected {
            if let Some(slot) = self.slot(selected) {
                if let Some(interactive) = slot.element.borrow_mut().as_interactive() {
                    interactive.handle_input(event);
                }
            }
        }

        if event.is_consumed() {
            return;
        }

        let moves_down = event.kinds.contains(InputKind::SELECTION_DOWN);
        let moves_up = event.kinds.contains(InputKind::SELECTION_UP);
        if !moves_down && !moves_up {
            return;
        }

        let order = self.selection_order();
        if order.is_empty() {
            self.select(None);
            return;
        }

        let position = self
            .selected
            .and_then(|selected| order.iter().position(|id| *id == selected));

        let target = if moves_down {
            match position {
                Some(p) => (p + 1) % order.len(),
                None => 0,
            }
        } else {
            match position {
                Some(0) | None => order.len() - 1,
                Some(p) => p - 1,
            }
        };

        self.select(Some(order[target]));
    }

    /// Enabled, visible interactive element ids sorted by ascending tab
    /// index; ties keep insertion order.
    fn selection_order(&self) -> Vec<ElementId> {
        let mut order: Vec<(i32, ElementId)> = Vec::new();

        for slot in &self.elements {
            let mut element = slot.element.borrow_mut();
            let visible = element.visible();
            if let Some(interactive) = element.as_interactive() {
                if interactive.enabled() && visible {
                    order.push((interactive.tab_index(), slot.id));
                }
            }
        }

        order.sort_by_key(|(tab_index, _)| *tab_index);
        order.into_iter().map(|(_, id)| id).collect()
    }

    fn is_selectable(&self, id: ElementId) -> bool {
        let Some(slot) = self.slot(id) else {
            return false;
        };
        let mut element = slot.element.borrow_mut();
        let visible = element.visible();
        match element.as_interactive() {
            Some(interactive) => interactive.enabled() && visible,
            None => false,
        }
    }

    /// Move the selection, clearing the previous holder's flag.
    fn select(&mut self, target: Option<ElementId>) {
        if self.selected == target {
            return;
        }

        if let Some(previous) = self.selected.take() {
            if let Some(slot) = self.slot(previous) {
                if let Some(interactive) = slot.element.borrow_mut().as_interactive() {
                    interactive.set_selected(false);
                }
            }
        }

        let Some(id) = target else {
            return;
        };

        let mut marked = false;
        if let Some(slot) = self.slot(id) {
            if let Some(interactive) = slot.element.borrow_mut().as_interactive() {
                interactive.set_selected(true);
                marked = true;
            }
        }

        if marked {
            self.selected = Some(id);
            debug!("view `{}`: selected element {}", self.name, id);
        }
    }

    fn slot(&self, id: ElementId) -> Option<&ViewSlot> {
        self.elements.iter().find(|slot| slot.id == id)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Button, Element, Interactive, Label, TextElement};
    use crate::input::{KeyCode, KeyEvent, KeyModifiers};
    use crate::renderer::CaptureConsole;
    use crate::types::Color;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn view() -> View {
        View::new(
            "test",
            0,
            20,
            10,
            Symbol::new(' ', Color::Black, Color::White),
        )
        .unwrap()
    }

    fn event(kinds: InputKind) -> InputEvent {
        InputEvent::new(kinds, KeyEvent::new(KeyCode::Null, KeyModifiers::NONE))
    }

    fn button(text: &str, tab_index: i32) -> Rc<RefCell<Button>> {
        let mut button = Button::new(0, 0, 4, 1, text).unwrap();
        button.set_tab_index(tab_index);
        Rc::new(RefCell::new(button))
    }

    #[test]
    fn test_duplicate_add_is_an_error() {
        let mut view = view();
        let label = Rc::new(RefCell::new(Label::new(0, 0, "x")));

        view.add_element(label.clone()).unwrap();
        assert!(matches!(
            view.add_element(label),
            Err(UiError::DuplicateElement)
        ));
    }

    #[test]
    fn test_element_owned_elsewhere_is_rejected() {
        let mut first = view();
        let mut second = view();
        let label = Rc::new(RefCell::new(Label::new(0, 0, "x")));

        first.add_element(label.clone()).unwrap();
        assert!(matches!(
            second.add_element(label),
            Err(UiError::AlreadyOwned)
        ));
    }

    #[test]
    fn test_add_draws_and_flushes_once_pumped() {
        let mut view = view();
        let label = Rc::new(RefCell::new(Label::new(1, 1, "hi")));
        view.add_element(label).unwrap();

        let mut console = CaptureConsole::new();
        view.draw_buffer(&mut console).unwrap();

        assert_eq!(console.cell(1, 1).unwrap().character, 'h');
        assert_eq!(console.cell(2, 1).unwrap().character, 'i');
        // Clearance filled the rest of the region.
        assert_eq!(console.cell(0, 0).unwrap().character, ' ');
    }

    #[test]
    fn test_pump_redraws_changed_elements() {
        let mut view = view();
        let label = Rc::new(RefCell::new(Label::new(0, 0, "aa")));
        view.add_element(label.clone()).unwrap();

        let mut console = CaptureConsole::new();
        view.draw_buffer(&mut console).unwrap();
        console.clear();

        label.borrow_mut().set_text("bb");
        view.pump();
        view.draw_buffer(&mut console).unwrap();

        assert_eq!(console.cell(0, 0).unwrap().character, 'b');
        assert_eq!(console.cell(1, 0).unwrap().character, 'b');
    }

    #[test]
    fn test_pump_without_changes_is_quiet() {
        let mut view = view();
        let label = Rc::new(RefCell::new(Label::new(0, 0, "x")));
        view.add_element(label).unwrap();

        let mut console = CaptureConsole::new();
        view.draw_buffer(&mut console).unwrap();
        console.clear();

        view.pump();
        view.draw_buffer(&mut console).unwrap();
        assert!(console.writes().is_empty());
    }

    #[test]
    fn test_insertion_order_paints_later_over_earlier() {
        let mut view = view();
        let under = Rc::new(RefCell::new(Label::new(0, 0, "under!")));
        let over = Rc::new(RefCell::new(Label::new(0, 0, "over")));
        view.add_element(under).unwrap();
        view.add_element(over).unwrap();

        let mut console = CaptureConsole::new();
        view.draw_buffer(&mut console).unwrap();

        assert_eq!(console.cell(0, 0).unwrap().character, 'o');
        assert_eq!(console.cell(4, 0).unwrap().character, 'r');
    }

    #[test]
    fn test_invisible_elements_are_skipped() {
        let mut view = view();
        let label = Rc::new(RefCell::new(Label::new(0, 0, "x")));
        view.add_element(label.clone()).unwrap();

        label.borrow_mut().set_visible(false);
        view.pump();

        let mut console = CaptureConsole::new();
        view.draw_buffer(&mut console).unwrap();
        assert_eq!(console.cell(0, 0).unwrap().character, ' ');
    }

    #[test]
    fn test_selection_cycles_by_tab_index() {
        let mut view = view();
        let third = button("3", 30);
        let first = button("1", 10);
        let second = button("2", 20);
        view.add_elements(vec![third.clone(), first.clone(), second.clone()])
            .unwrap();

        view.on_new_input(&mut event(InputKind::SELECTION_DOWN));
        assert!(first.borrow().selected());

        view.on_new_input(&mut event(InputKind::SELECTION_DOWN));
        assert!(second.borrow().selected());
        assert!(!first.borrow().selected());

        view.on_new_input(&mut event(InputKind::SELECTION_DOWN));
        assert!(third.borrow().selected());

        // Wraps to the first.
        view.on_new_input(&mut event(InputKind::SELECTION_DOWN));
        assert!(first.borrow().selected());

        // And backwards from the first to the last.
        view.on_new_input(&mut event(InputKind::SELECTION_UP));
        assert!(third.borrow().selected());
    }

    #[test]
    fn test_selected_element_consumes_before_navigation() {
        let mut view = view();
        let a = button("a", 1);
        let b = button("b", 2);
        view.add_elements(vec![a.clone(), b.clone()]).unwrap();

        view.on_new_input(&mut event(InputKind::SELECTION_DOWN));
        assert!(a.borrow().selected());

        // Enter goes to the selected button and is consumed there.
        let mut enter = event(InputKind::ENTER | InputKind::SELECTION_DOWN);
        view.on_new_input(&mut enter);
        assert!(enter.is_consumed());
        assert!(a.borrow().selected());
        assert!(!b.borrow().selected());
    }

    #[test]
    fn test_disabled_selected_element_loses_selection() {
        let mut view = view();
        let a = button("a", 1);
        view.add_element(a.clone()).unwrap();

        view.on_new_input(&mut event(InputKind::SELECTION_DOWN));
        assert!(a.borrow().selected());

        a.borrow_mut().set_enabled(false);
        view.pump();
        assert!(!a.borrow().selected());
    }

    #[test]
    fn test_no_selectable_elements_clears_selection() {
        let mut view = view();
        let a = button("a", 1);
        let label = Rc::new(RefCell::new(Label::new(0, 5, "plain")));
        view.add_elements(vec![a.clone()]).unwrap();
        view.add_element(label).unwrap();

        view.on_new_input(&mut event(InputKind::SELECTION_DOWN));
        assert!(a.borrow().selected());

        a.borrow_mut().set_enabled(false);
        view.pump();

        view.on_new_input(&mut event(InputKind::SELECTION_DOWN));
        assert!(!a.borrow().selected());
    }

    #[test]
    fn test_remove_element() {
        let mut view = view();
        let a = button("a", 1);
        view.add_element(a.clone()).unwrap();

        view.on_new_input(&mut event(InputKind::SELECTION_DOWN));
        assert!(a.borrow().selected());

        let handle: SharedElement = a.clone();
        assert!(view.remove_element(&handle));
        assert!(!view.remove_element(&handle));
        assert!(!a.borrow().selected());

        // Detached: re-adding to another view works.
        let mut other = view_named("other");
        other.add_element(a).unwrap();
    }

    fn view_named(name: &str) -> View {
        View::new(name, 0, 20, 10, Symbol::new(' ', Color::Black, Color::White)).unwrap()
    }

    #[test]
    fn test_refresh_lattice() {
        let mut view = view();
        let label = Rc::new(RefCell::new(Label::new(0, 0, "abc")));
        view.add_element(label.clone()).unwrap();

        let mut console = CaptureConsole::new();
        view.draw_buffer(&mut console).unwrap();

        // Partial: only the changed cell is written.
        label.borrow_mut().set_text("xbc");
        view.pump();
        console.clear();
        view.draw_buffer(&mut console).unwrap();
        assert_eq!(console.writes().len(), 1);

        // Full refresh rewrites everything.
        view.refresh(true);
        console.clear();
        view.draw_buffer(&mut console).unwrap();
        assert_eq!(console.writes().len(), 200);

        // Full is never downgraded by a later partial request.
        view.refresh(true);
        view.refresh(false);
        console.clear();
        view.draw_buffer(&mut console).unwrap();
        assert_eq!(console.writes().len(), 200);
    }

    #[test]
    fn test_double_redraw_upgrades_to_full() {
        let mut view = view();
        let label = Rc::new(RefCell::new(Label::new(0, 0, "x")));
        view.add_element(label.clone()).unwrap();

        let mut console = CaptureConsole::new();
        view.draw_buffer(&mut console).unwrap();
        console.clear();

        // Two redraw-triggering changes before the next flush: the flush
        // covers every cell even though only one changed.
        label.borrow_mut().set_text("y");
        view.pump();
        label.borrow_mut().set_text("z");
        view.pump();

        view.draw_buffer(&mut console).unwrap();
        assert_eq!(console.writes().len(), 200);
    }
}
