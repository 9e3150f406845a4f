use std::collections::VecDeque;

use crate::geometry::Point;

/// Ordered cells occupied by a snake, front first.
#[derive(Clone, Debug, Default)]
pub struct Body {
    cells: VecDeque<Point>,
}

impl Body {
    pub fn new() -> Self {
        Body { cells: VecDeque::new() }
    }

    pub fn append(&mut self, cell: Point) {
        self.cells.push_back(cell);
    }

    pub fn prepend(&mut self, cell: Point) {
        self.cells.push_front(cell);
    }

    /// Callers must keep the body non-empty; on an empty body this returns `None`.
    pub fn remove_last(&mut self) -> Option<Point> {
        self.cells.pop_back()
    }

    pub fn contains(&self, cell: Point) -> bool {
        self.cells.contains(&cell)
    }

    pub fn front(&self) -> Option<Point> {
        self.cells.front().copied()
    }

    pub fn back(&self) -> Option<Point> {
        self.cells.back().copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.cells.iter()
    }
}
