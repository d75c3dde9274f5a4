//! Layout groups - composite positioning of elements.
//!
//! A group owns an ordered, duplicate-free set of children and reflows their
//! positions under a policy: [`ElementList`] stacks along one axis,
//! [`ElementGrid`] packs into uniform cells. Groups position anything
//! [`Layoutable`] - widgets or nested groups - and are not drawable
//! themselves; children are added to a view for drawing and to a group for
//! placement.
//!
//! Moving a group (pure X/Y change) translates every child by the same delta
//! without a reflow; any size or policy change runs a full
//! [`Container::reorder`], which also recomputes the group's own bounding
//! size.

use crate::element::{same_target, Layoutable, SharedLayoutable};

mod grid;
mod list;

pub use grid::ElementGrid;
pub use list::ElementList;

/// Owns children and can reflow them.
pub trait Container: Layoutable {
    /// Add a child. Re-adding a child already in this group is a no-op
    /// reported as `false`.
    fn add_child(&mut self, child: SharedLayoutable) -> bool;

    /// Add several children in order.
    fn add_children(&mut self, children: Vec<SharedLayoutable>) {
        for child in children {
            self.add_child(child);
        }
    }

    /// Remove a child. Returns `false` if it was not part of this group.
    fn remove_child(&mut self, child: &SharedLayoutable) -> bool;

    /// Recompute every child's position and the group's bounding size.
    fn reorder(&mut self);
}

/// Geometry and child list shared by the concrete groups.
#[derive(Default)]
pub(crate) struct GroupBase {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub children: Vec<SharedLayoutable>,
}

impl GroupBase {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            width: 0,
            height: 0,
            children: Vec::new(),
        }
    }

    /// Append `child` unless it is already present.
    pub fn add(&mut self, child: SharedLayoutable) -> bool {
        if self.children.iter().any(|existing| same_target(existing, &child)) {
            return false;
        }
        self.children.push(child);
        true
    }

    /// Drop `child` if present.
    pub fn remove(&mut self, child: &SharedLayoutable) -> bool {
        let before = self.children.len();
        self.children.retain(|existing| !same_target(existing, child));
        self.children.len() != before
    }

    /// Shift every child by the same delta (cheap move, no reflow).
    pub fn translate(&mut self, dx: i32, dy: i32) {
        for child in &self.children {
            let mut child = child.borrow_mut();
            if dx != 0 {
                let x = child.x();
                child.set_x(x + dx);
            }
            if dy != 0 {
                let y = child.y();
                child.set_y(y + dy);
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
