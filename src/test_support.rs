//! Fixtures shared by the unit tests.

use crate::filling::Filling;
use crate::geometry::{Index, Size};
use crate::grid::{Cell, CellId, Grid};
use crate::pattern::Pattern;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Piece {
    A,
    B,
    C,
    D,
    /// Distinct one-off pieces for boards that must not match anywhere.
    N(u8),
    /// Bonus: line of four.
    Star,
    /// Bonus: corner of five.
    Bomb,
    /// Obstacle.
    Rock,
}

impl Filling for Piece {
    fn pattern(&self) -> Pattern {
        match self {
            Piece::Star => Pattern::line(4),
            Piece::Bomb => Pattern::new(
                [(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]
                    .into_iter()
                    .map(Index::from),
            ),
            _ => Pattern::empty(),
        }
    }
}

impl Piece {
    /// `A`-`D`, `*` star, `@` bomb, `#` rock, and any other character as a
    /// one-off `N`.
    pub fn from_char(c: char) -> Self {
        match c {
            'A' => Piece::A,
            'B' => Piece::B,
            'C' => Piece::C,
            'D' => Piece::D,
            '*' => Piece::Star,
            '@' => Piece::Bomb,
            '#' => Piece::Rock,
            other => Piece::N(other as u8),
        }
    }
}

/// Builds a grid from column strings, each listed bottom (row 0) to top.
/// Ids are assigned in storage order starting at 0.
pub fn grid_from_columns(columns: &[&str]) -> Grid<Piece> {
    let rows = columns.first().map_or(0, |c| c.chars().count());
    let mut next = 0u64;
    let cells = columns
        .iter()
        .map(|column| {
            column
                .chars()
                .map(|ch| {
                    next += 1;
                    Cell::new(CellId(next - 1), Piece::from_char(ch))
                })
                .collect()
        })
        .collect();
    Grid::from_columns(Size::new(columns.len() as i32, rows as i32), cells)
        .expect("fixture columns must all have the same length")
}

/// Reads a grid back into column strings for readable assertions.
pub fn columns_of(grid: &Grid<Piece>) -> Vec<String> {
    grid.columns()
        .iter()
        .map(|column| {
            column
                .iter()
                .map(|cell| match cell.filling {
                    Piece::A => 'A',
                    Piece::B => 'B',
                    Piece::C => 'C',
                    Piece::D => 'D',
                    Piece::Star => '*',
                    Piece::Bomb => '@',
                    Piece::Rock => '#',
                    Piece::N(b) => b as char,
                })
                .collect()
        })
        .collect()
}
