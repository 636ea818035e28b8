//! Grid geometry: dimensions, coordinates and directional walks.
//!
//! Coordinates are column/row pairs with row 0 at the bottom of the board,
//! so `upper` means `row + 1`. An [`Index`] is not necessarily inside the
//! grid; neighbor probing routinely produces indices one step past an edge,
//! and [`Size::contains`] is the only authority on validity.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// An ordered set of indices, iterated column-major (`column`, then `row`).
pub type Indices = BTreeSet<Index>;

/// Grid dimensions, fixed for the lifetime of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub columns: i32,
    pub rows: i32,
}

impl Size {
    pub const fn new(columns: i32, rows: i32) -> Self {
        Self { columns, rows }
    }

    /// Exclusive lower limit of valid rows.
    #[inline(always)]
    pub const fn lower_bound(&self) -> i32 {
        -1
    }

    /// Exclusive upper limit of valid rows.
    #[inline(always)]
    pub const fn upper_bound(&self) -> i32 {
        self.rows
    }

    /// Exclusive lower limit of valid columns.
    #[inline(always)]
    pub const fn left_bound(&self) -> i32 {
        -1
    }

    /// Exclusive upper limit of valid columns.
    #[inline(always)]
    pub const fn right_bound(&self) -> i32 {
        self.columns
    }

    /// True iff `index` lies strictly between the four bounds.
    #[inline(always)]
    pub fn contains(&self, index: Index) -> bool {
        index.column > self.left_bound()
            && index.column < self.right_bound()
            && index.row > self.lower_bound()
            && index.row < self.upper_bound()
    }

    /// Total number of cells.
    pub fn area(&self) -> usize {
        self.columns.max(0) as usize * self.rows.max(0) as usize
    }
}

/// One of the four orthogonal directions a walk can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Upper,
    Right,
    Lower,
}

impl Direction {
    /// Same order as [`Index::neighbors`].
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Upper,
        Direction::Right,
        Direction::Lower,
    ];

    #[inline(always)]
    const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Upper => (0, 1),
            Direction::Right => (1, 0),
            Direction::Lower => (0, -1),
        }
    }
}

/// A cell coordinate. Equality, hashing and ordering are by value,
/// ordered by column first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Index {
    pub column: i32,
    pub row: i32,
}

impl Index {
    pub const ZERO: Index = Index { column: 0, row: 0 };

    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    #[inline(always)]
    pub const fn offset(self, columns: i32, rows: i32) -> Self {
        Self {
            column: self.column + columns,
            row: self.row + rows,
        }
    }

    #[inline(always)]
    pub const fn step(self, direction: Direction) -> Self {
        let (dc, dr) = direction.delta();
        self.offset(dc, dr)
    }

    #[inline(always)]
    pub const fn upper(self) -> Self {
        self.step(Direction::Upper)
    }

    #[inline(always)]
    pub const fn lower(self) -> Self {
        self.step(Direction::Lower)
    }

    #[inline(always)]
    pub const fn right(self) -> Self {
        self.step(Direction::Right)
    }

    #[inline(always)]
    pub const fn left(self) -> Self {
        self.step(Direction::Left)
    }

    /// Orthogonal neighbors: `[left, upper, right, lower]`.
    pub const fn neighbors(self) -> [Index; 4] {
        [self.left(), self.upper(), self.right(), self.lower()]
    }

    /// Diagonal neighbors: lower-left, upper-right, upper-left, lower-right.
    pub const fn diagonal_neighbors(self) -> [Index; 4] {
        [
            self.offset(-1, -1),
            self.offset(1, 1),
            self.offset(-1, 1),
            self.offset(1, -1),
        ]
    }

    pub fn is_neighboring(self, other: Index) -> bool {
        self.neighbors().contains(&other)
    }

    /// Unbounded walk starting one step away from `self`.
    ///
    /// The walk never ends on its own; bound it with `take_while` against
    /// [`Size::contains`] or similar.
    pub fn walk(self, direction: Direction) -> Walk {
        Walk {
            next: self.step(direction),
            direction,
        }
    }

    /// Same index with column and row exchanged.
    #[inline(always)]
    pub const fn transposed(self) -> Self {
        Self {
            column: self.row,
            row: self.column,
        }
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

impl From<(i32, i32)> for Index {
    fn from((column, row): (i32, i32)) -> Self {
        Self { column, row }
    }
}

/// Infinite iterator of indices in one direction. See [`Index::walk`].
#[derive(Debug, Clone)]
pub struct Walk {
    next: Index,
    direction: Direction,
}

impl Iterator for Walk {
    type Item = Index;

    #[inline]
    fn next(&mut self) -> Option<Index> {
        let current = self.next;
        self.next = current.step(self.direction);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl std::iter::FusedIterator for Walk {}
