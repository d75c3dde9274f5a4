//! ElementList - linear stacking along one axis.

use crate::element::{Layoutable, SharedLayoutable};
use crate::layout::{Container, GroupBase};
use crate::types::{AlignmentHorizontal, AlignmentVertical};

/// Arranges its children in a horizontal or vertical line.
///
/// The primary-axis extent is the sum of child sizes plus `padding` between
/// neighbours; the secondary extent is the largest child. Children are
/// placed sequentially from the group origin and aligned on the secondary
/// axis against that extent.
pub struct ElementList {
    group: GroupBase,
    horizontal: bool,
    vertical_alignment: AlignmentVertical,
    horizontal_alignment: AlignmentHorizontal,
    padding: i32,
}

impl ElementList {
    /// A list at `(x, y)`, stacking horizontally or vertically.
    ///
    /// Defaults: centered secondary alignment, padding 0.
    pub fn new(x: i32, y: i32, horizontal: bool) -> Self {
        Self {
            group: GroupBase::new(x, y),
            horizontal,
            vertical_alignment: AlignmentVertical::Middle,
            horizontal_alignment: AlignmentHorizontal::Middle,
            padding: 0,
        }
    }

    /// Whether children stack horizontally (`true`) or vertically.
    pub fn horizontal(&self) -> bool {
        self.horizontal
    }

    /// Flip the stacking axis; reflows.
    pub fn set_horizontal(&mut self, value: bool) {
        if self.horizontal == value {
            return;
        }
        self.horizontal = value;
        self.reorder();
    }

    /// Secondary-axis alignment used while stacking horizontally.
    pub fn vertical_alignment(&self) -> AlignmentVertical {
        self.vertical_alignment
    }

    /// Set the vertical alignment; reflows. Ignored while stacking
    /// vertically.
    pub fn set_vertical_alignment(&mut self, value: AlignmentVertical) {
        if self.vertical_alignment == value {
            return;
        }
        self.vertical_alignment = value;
        self.reorder();
    }

    /// Secondary-axis alignment used while stacking vertically.
    pub fn horizontal_alignment(&self) -> AlignmentHorizontal {
        self.horizontal_alignment
    }

    /// Set the horizontal alignment; reflows. Ignored while stacking
    /// horizontally.
    pub fn set_horizontal_alignment(&mut self, value: AlignmentHorizontal) {
        if self.horizontal_alignment == value {
            return;
        }
        self.horizontal_alignment = value;
        self.reorder();
    }

    /// The gap between neighbouring children.
    pub fn padding(&self) -> i32 {
        self.padding
    }

    /// Set the gap; negative values clamp to 0. Reflows.
    pub fn set_padding(&mut self, value: i32) {
        let value = value.max(0);
        if self.padding == value {
            return;
        }
        self.padding = value;
        self.reorder();
    }
}

impl Layoutable for ElementList {
    fn x(&self) -> i32 {
        self.group.x
    }

    fn y(&self) -> i32 {
        self.group.y
    }

    fn width(&self) -> i32 {
        self.group.width
    }

    fn height(&self) -> i32 {
        self.group.height
    }

    fn set_x(&mut self, value: i32) {
        let dx = value - self.group.x;
        if dx == 0 {
            return;
        }
        self.group.x = value;
        self.group.translate(dx, 0);
    }

    fn set_y(&mut self, value: i32) {
        let dy = value - self.group.y;
        if dy == 0 {
            return;
        }
        self.group.y = value;
        self.group.translate(0, dy);
    }

    fn set_width(&mut self, value: i32) {
        if self.group.width == value {
            return;
        }
        self.group.width = value;
        self.reorder();
    }

    fn set_height(&mut self, value: i32) {
        if self.group.height == value {
            return;
        }
        self.group.height = value;
        self.reorder();
    }
}

impl Container for ElementList {
    fn add_child(&mut self, child: SharedLayoutable) -> bool {
        self.group.add(child)
    }

    fn remove_child(&mut self, child: &SharedLayoutable) -> bool {
        self.group.remove(child)
    }

    fn reorder(&mut self) {
        if self.group.children.is_empty() {
            return;
        }

        let gaps = (self.group.children.len() as i32 - 1) * self.padding;
        let mut total_width = if self.horizontal { gaps } else { 0 };
        let mut total_height = if self.horizontal { 0 } else { gaps };

        for child in &self.group.children {
            let child = child.borrow();
            if self.horizontal {
                total_width += child.width();
                total_height = total_height.max(child.height());
            } else {
                total_height += child.height();
                total_width = total_width.max(child.width());
            }
        }

        self.group.width = total_width;
        self.group.height = total_height;

        if self.horizontal {
            let mut x = self.group.x;
            for child in &self.group.children {
                let mut child = child.borrow_mut();
                child.set_x(x);
                x += child.width() + self.padding;

                let slack = total_height - child.height();
                let y = match self.vertical_alignment {
                    AlignmentVertical::Top => self.group.y,
                    AlignmentVertical::Middle => self.group.y + slack / 2,
                    AlignmentVertical::Bottom => self.group.y + slack,
                };
                child.set_y(y);
            }
        } else {
            let mut y = self.group.y;
            for child in &self.group.children {
                let mut child = child.borrow_mut();
                child.set_y(y);
                y += child.height() + self.padding;

                let slack = total_width - child.width();
                let x = match self.horizontal_alignment {
                    AlignmentHorizontal::Left => self.group.x,
                    AlignmentHorizontal::Middle => self.group.x + slack / 2,
                    AlignmentHorizontal::Right => self.group.x + slack,
                };
                child.set_x(x);
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Label, Rectangle};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn label(text: &str) -> Rc<RefCell<Label>> {
        Rc::new(RefCell::new(Label::new(0, 0, text)))
    }

    #[test]
    fn test_horizontal_stack_positions() {
        let mut list = ElementList::new(0, 0, true);
        let a = label("1");
        let b = label("22");
        let c = label("333");

        list.add_child(a.clone());
        list.add_children(vec![b.clone(), c.clone()]);
        list.reorder();

        assert_eq!(a.borrow().x(), 0);
        assert_eq!(b.borrow().x(), 1);
        assert_eq!(c.borrow().x(), 3);
        assert_eq!(list.width(), 6);
        assert_eq!(list.height(), 1);
    }

    #[test]
    fn test_vertical_stack_with_padding() {
        let mut list = ElementList::new(0, 0, true);
        let a = label("1");
        let b = label("22");
        let c = label("333");
        list.add_children(vec![a.clone(), b.clone(), c.clone()]);
        list.reorder();

        list.set_horizontal(false);
        list.set_padding(1);

        assert_eq!(a.borrow().y(), 0);
        assert_eq!(b.borrow().y(), 2);
        assert_eq!(c.borrow().y(), 4);
        assert_eq!(list.height(), 5);
        assert_eq!(list.width(), 3);
    }

    #[test]
    fn test_group_move_translates_children() {
        let mut list = ElementList::new(0, 0, true);
        let a = label("A");
        let b = label("B");
        let c = label("C");
        list.add_children(vec![a.clone(), b.clone(), c.clone()]);
        list.reorder();

        list.set_x(1);

        assert_eq!(a.borrow().x(), 1);
        assert_eq!(b.borrow().x(), 2);
        assert_eq!(c.borrow().x(), 3);
    }

    #[test]
    fn test_secondary_axis_alignment() {
        let mut list = ElementList::new(0, 0, true);
        let tall = Rc::new(RefCell::new(Rectangle::new(0, 0, 1, 3).unwrap()));
        let short = label("x");
        list.add_children(vec![tall.clone(), short.clone()]);

        list.set_vertical_alignment(AlignmentVertical::Top);
        assert_eq!(short.borrow().y(), 0);

        list.set_vertical_alignment(AlignmentVertical::Middle);
        assert_eq!(short.borrow().y(), 1);

        list.set_vertical_alignment(AlignmentVertical::Bottom);
        assert_eq!(short.borrow().y(), 2);
    }

    #[test]
    fn test_negative_padding_clamps() {
        let mut list = ElementList::new(0, 0, true);
        list.set_padding(-5);
        assert_eq!(list.padding(), 0);
    }

    #[test]
    fn test_duplicate_child_reported_not_raised() {
        let mut list = ElementList::new(0, 0, true);
        let a = label("A");
        assert!(list.add_child(a.clone()));
        assert!(!list.add_child(a));
    }
}
