//! ElementGrid - row-major packing into uniform cells.

use crate::element::{Layoutable, SharedLayoutable};
use crate::layout::{Container, GroupBase};
use crate::error::UiError;
use crate::types::{AlignmentHorizontal, AlignmentVertical};

/// Arranges its children in a matrix of uniform cells.
///
/// Every cell is as wide as the widest child and as tall as the tallest;
/// children are placed row-major and aligned inside their cell. The
/// effective column count is capped by the child count, and the row count
/// follows the child count (`ceil(children / columns)`); the `rows` value
/// given at construction records the intended capacity.
pub struct ElementGrid {
    group: GroupBase,
    columns: i32,
    rows: i32,
    vertical_alignment: AlignmentVertical,
    horizontal_alignment: AlignmentHorizontal,
}

impl ElementGrid {
    /// A grid at `(x, y)` with the given column and row counts, both at
    /// least 1.
    pub fn new(x: i32, y: i32, columns: i32, rows: i32) -> Result<Self, UiError> {
        if columns < 1 {
            return Err(UiError::range("columns"));
        }
        if rows < 1 {
            return Err(UiError::range("rows"));
        }

        Ok(Self {
            group: GroupBase::new(x, y),
            columns,
            rows,
            vertical_alignment: AlignmentVertical::Middle,
            horizontal_alignment: AlignmentHorizontal::Middle,
        })
    }

    /// The configured column count.
    pub fn columns(&self) -> i32 {
        self.columns
    }

    /// Set the column count; values below 1 clamp to 1. Reflows.
    pub fn set_columns(&mut self, value: i32) {
        let value = value.max(1);
        if self.columns == value {
            return;
        }
        self.columns = value;
        self.reorder();
    }

    /// The configured row count.
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Set the row count; values below 1 clamp to 1. Reflows.
    pub fn set_rows(&mut self, value: i32) {
        let value = value.max(1);
        if self.rows == value {
            return;
        }
        self.rows = value;
        self.reorder();
    }

    /// Vertical alignment of a child inside its cell.
    pub fn vertical_alignment(&self) -> AlignmentVertical {
        self.vertical_alignment
    }

    /// Set the vertical cell alignment; reflows.
    pub fn set_vertical_alignment(&mut self, value: AlignmentVertical) {
        if self.vertical_alignment == value {
            return;
        }
        self.vertical_alignment = value;
        self.reorder();
    }

    /// Horizontal alignment of a child inside its cell.
    pub fn horizontal_alignment(&self) -> AlignmentHorizontal {
        self.horizontal_alignment
    }

    /// Set the horizontal cell alignment; reflows.
    pub fn set_horizontal_alignment(&mut self, value: AlignmentHorizontal) {
        if self.horizontal_alignment == value {
            return;
        }
        self.horizontal_alignment = value;
        self.reorder();
    }
}

impl Layoutable for ElementGrid {
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

impl Container for ElementGrid {
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

        let count = self.group.children.len() as i32;
        let effective_columns = count.min(self.columns);
        let row_count = (count + self.columns - 1) / self.columns;

        let mut max_width = 0;
        let mut max_height = 0;
        for child in &self.group.children {
            let child = child.borrow();
            max_width = max_width.max(child.width());
            max_height = max_height.max(child.height());
        }

        self.group.width = max_width * effective_columns;
        self.group.height = max_height * row_count;

        let mut index = 0usize;
        'rows: for row in 0..row_count {
            for column in 0..effective_columns {
                let Some(child) = self.group.children.get(index) else {
                    break 'rows;
                };
                let mut child = child.borrow_mut();

                let cell_x = self.group.x + column * max_width;
                let cell_y = self.group.y + row * max_height;

                let x = match self.horizontal_alignment {
                    AlignmentHorizontal::Left => cell_x,
                    AlignmentHorizontal::Middle => cell_x + (max_width - child.width()) / 2,
                    AlignmentHorizontal::Right => cell_x + (max_width - child.width()),
                };
                let y = match self.vertical_alignment {
                    AlignmentVertical::Top => cell_y,
                    AlignmentVertical::Middle => cell_y + (max_height - child.height()) / 2,
                    AlignmentVertical::Bottom => cell_y + (max_height - child.height()),
                };

                child.set_x(x);
                child.set_y(y);

                index += 1;
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
