use std::cmp::min;
use std::ops::Add;

use log::info;

use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

impl Point {
    pub const fn new(row: i32, col: i32) -> Self {
        Point { row, col }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.row + other.row, self.col + other.col)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    /// Not moving yet.
    None,
}

impl Direction {
    pub fn offset(self) -> Point {
        match self {
            Up => Point::new(-1, 0),
            Down => Point::new(1, 0),
            Left => Point::new(0, -1),
            Right => Point::new(0, 1),
            None => Point::new(0, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
            None => None,
        }
    }
}

/// Playable area of the board. A cell is inside when
/// `1 <= row < row_limit` and `1 <= col < col_limit`; row 0, col 0 and the
/// limits themselves are the border.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Field {
    row_limit: i32,
    col_limit: i32,
}

/// Columns taken by the window borders on the right side of the board.
const COL_MARGIN: i32 = 3;

impl Field {
    pub fn new(row_limit: i32, col_limit: i32) -> Self {
        Field { row_limit, col_limit }
    }

    /// Builds the field for a terminal of `cols` x `rows`, leaving room for the
    /// stats bar on top and the borders.
    pub fn for_terminal(cols: u16, rows: u16, stats_height: u16) -> Self {
        Field::new(rows as i32 - stats_height as i32 - 1, cols as i32 - COL_MARGIN)
    }

    pub fn row_limit(&self) -> i32 {
        self.row_limit
    }

    pub fn col_limit(&self) -> i32 {
        self.col_limit
    }

    pub fn contains(&self, p: Point) -> bool {
        p.row >= 1 && p.col >= 1 && p.row < self.row_limit && p.col < self.col_limit
    }

    pub fn center(&self) -> Point {
        Point::new(self.row_limit / 2, self.col_limit / 2)
    }

    pub fn interior(&self) -> impl Iterator<Item = Point> + '_ {
        (1..self.row_limit).flat_map(move |row| (1..self.col_limit).map(move |col| Point::new(row, col)))
    }

    pub fn interior_size(&self) -> usize {
        let rows = (self.row_limit - 1).max(0) as usize;
        let cols = (self.col_limit - 1).max(0) as usize;
        rows * cols
    }
}

/// Discount applied to every food increment, derived from the screen size so
/// big terminals don't hand out inflated scores. Always strictly below
/// `score_point_value * speed_factor`.
pub fn bound_factor(cols: u16, rows: u16, score_point_value: u32, speed_factor: u32) -> u32 {
    let factor = min(cols, rows) as u32;
    let max_factor = score_point_value.saturating_mul(speed_factor);

    if factor >= max_factor {
        let capped = max_factor.saturating_sub(1);
        info!("Screen dimensions are too big, capping the bound factor at {}", capped);
        capped
    } else {
        factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_unit_vectors() {
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            let o = dir.offset();
            assert_eq!(o.row.abs() + o.col.abs(), 1);
            assert_eq!(dir.opposite().offset() + o, Point::new(0, 0));
        }
        assert_eq!(Direction::None.offset(), Point::new(0, 0));
        assert_eq!(Direction::None.opposite(), Direction::None);
    }

    #[test]
    fn field_excludes_borders() {
        let field = Field::new(20, 20);
        assert!(field.contains(Point::new(1, 1)));
        assert!(field.contains(Point::new(19, 19)));
        assert!(!field.contains(Point::new(0, 5)));
        assert!(!field.contains(Point::new(5, 0)));
        assert!(!field.contains(Point::new(20, 5)));
        assert!(!field.contains(Point::new(5, 20)));
        assert_eq!(field.interior().count(), field.interior_size());
        assert_eq!(field.interior_size(), 19 * 19);
    }

    #[test]
    fn terminal_field_leaves_room_for_stats() {
        let field = Field::for_terminal(80, 25, 3);
        assert_eq!(field.row_limit(), 21);
        assert_eq!(field.col_limit(), 77);
    }

    #[test]
    fn bound_factor_is_capped() {
        assert_eq!(bound_factor(80, 25, 6, 8), 25);
        assert_eq!(bound_factor(200, 100, 6, 8), 47);
        assert!(bound_factor(u16::MAX, u16::MAX, 1, 1) < 1);
        assert_eq!(bound_factor(80, 25, u32::MAX, 2), 25);
        assert_eq!(bound_factor(80, 25, 0, 8), 0);
    }
}
