//! Dense column-major cell storage.
//!
//! `columns[c][r]` holds the cell at `Index { column: c, row: r }`. A grid
//! is a plain value: cloning it copies every cell, which is what lets the
//! controller try a swap on a throwaway copy.

use crate::error::ConfigError;
use crate::geometry::{Index, Indices, Size};
use crate::partition::stable_partition;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops;

/// Opaque piece identity. Assigned once by the generator, carried through
/// swaps and gravity, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(pub u64);

/// A piece on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell<F> {
    pub id: CellId,
    pub filling: F,
}

impl<F> Cell<F> {
    pub fn new(id: CellId, filling: F) -> Self {
        Self { id, filling }
    }
}

/// Deserializing checks the columns against `size`, like
/// [`Grid::from_columns`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid<F> {
    size: Size,
    columns: Vec<Vec<Cell<F>>>,
}

impl<F> Grid<F> {
    /// Wrap pre-built columns.
    ///
    /// Returns `None` if the column count or any column length disagrees
    /// with `size`.
    pub fn from_columns(size: Size, columns: Vec<Vec<Cell<F>>>) -> Option<Self> {
        let grid = Self { size, columns };
        grid.is_well_formed().then_some(grid)
    }

    pub(crate) fn from_parts(size: Size, columns: Vec<Vec<Cell<F>>>) -> Self {
        let grid = Self { size, columns };
        debug_assert!(grid.is_well_formed());
        grid
    }

    /// True iff the storage shape agrees with `size`.
    pub fn is_well_formed(&self) -> bool {
        self.size.columns >= 0
            && self.size.rows >= 0
            && self.columns.len() == self.size.columns as usize
            && self.columns.iter().all(|c| c.len() == self.size.rows as usize)
    }

    #[inline(always)]
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn columns(&self) -> &[Vec<Cell<F>>] {
        &self.columns
    }

    /// Every in-bounds index, column by column, bottom to top.
    pub fn all_indices(&self) -> Vec<Index> {
        let mut result = Vec::with_capacity(self.size.area());
        for (column, cells) in self.columns.iter().enumerate() {
            for row in 0..cells.len() {
                result.push(Index::new(column as i32, row as i32));
            }
        }
        result
    }

    /// Panics if `index` is outside the grid.
    #[inline]
    pub fn cell(&self, index: Index) -> &Cell<F> {
        let (c, r) = self.slot(index);
        &self.columns[c][r]
    }

    /// Overwrites the slot at `index`. Panics if `index` is outside the grid.
    pub fn set_cell(&mut self, cell: Cell<F>, index: Index) {
        let (c, r) = self.slot(index);
        self.columns[c][r] = cell;
    }

    /// Exchanges two cells, identities included.
    pub fn swap_cell(&mut self, index: Index, target: Index) {
        let (ac, ar) = self.slot(index);
        let (bc, br) = self.slot(target);
        if ac == bc {
            self.columns[ac].swap(ar, br);
        } else {
            let (low, high) = self.columns.split_at_mut(ac.max(bc));
            let (a, b) = if ac < bc {
                (&mut low[ac][ar], &mut high[0][br])
            } else {
                (&mut high[0][ar], &mut low[bc][br])
            };
            std::mem::swap(a, b);
        }
    }

    /// Gravity: drops the cells at `removed` out of every column.
    ///
    /// In each column the surviving cells slide toward row 0 in their
    /// original order, and the removed cells collect at the top, also in
    /// order. Returns the top slots of every column that now need a fresh
    /// cell. The slots are not necessarily the indices passed in.
    pub fn remove(&mut self, removed: &Indices) -> Indices {
        let mut freed = Indices::new();
        for (c, column) in self.columns.iter_mut().enumerate() {
            let c = c as i32;
            if !removed.iter().any(|i| i.column == c) {
                continue;
            }

            let mut tagged: Vec<(bool, Cell<F>)> = column
                .drain(..)
                .enumerate()
                .map(|(r, cell)| (removed.contains(&Index::new(c, r as i32)), cell))
                .collect();
            let start = stable_partition(&mut tagged, |(gone, _)| *gone);
            column.extend(tagged.into_iter().map(|(_, cell)| cell));

            freed.extend((start..column.len()).map(|r| Index::new(c, r as i32)));
        }
        freed
    }

    #[inline(always)]
    fn slot(&self, index: Index) -> (usize, usize) {
        assert!(
            index.column >= 0
                && index.row >= 0
                && index.column < self.size.columns
                && index.row < self.size.rows,
            "index {index} is outside a {}x{} grid",
            self.size.columns,
            self.size.rows
        );
        (index.column as usize, index.row as usize)
    }
}

/// Shape actually held by `columns`, counting rows by the shortest column.
pub(crate) fn storage_size<F>(columns: &[Vec<Cell<F>>]) -> Size {
    let rows = columns.iter().map(Vec::len).min().unwrap_or(0);
    Size::new(columns.len() as i32, rows as i32)
}

impl<'de, F: Deserialize<'de>> Deserialize<'de> for Grid<F> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(rename = "Grid")]
        struct Raw<T> {
            size: Size,
            columns: Vec<Vec<Cell<T>>>,
        }

        let Raw { size, columns } = Raw::deserialize(deserializer)?;
        let found = storage_size(&columns);
        Grid::from_columns(size, columns).ok_or_else(|| {
            D::Error::custom(ConfigError::GridMismatch {
                expected: size,
                found,
            })
        })
    }
}

impl<F: PartialEq> Grid<F> {
    pub fn all_indices_of(&self, filling: &F) -> Vec<Index> {
        self.all_indices()
            .into_iter()
            .filter(|&i| self.cell(i).filling == *filling)
            .collect()
    }
}

impl<F> ops::Index<Index> for Grid<F> {
    type Output = Cell<F>;

    fn index(&self, index: Index) -> &Cell<F> {
        self.cell(index)
    }
}

impl<F> ops::IndexMut<Index> for Grid<F> {
    fn index_mut(&mut self, index: Index) -> &mut Cell<F> {
        let (c, r) = self.slot(index);
        &mut self.columns[c][r]
    }
}

/// Top row first, one tab-separated line per row.
impl<F: fmt::Debug> fmt::Display for Grid<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.size.rows.max(0) as usize).rev() {
            for column in &self.columns {
                write!(f, "{:?}\t", column[row].filling)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
