//! Run detection.
//!
//! A match at an index is every cell reachable by walking outward along one
//! axis while the match predicate holds against the seed cell, kept only if
//! that axis reaches `min_series` cells. Horizontal and vertical runs are
//! judged independently, so an L or T of two runs comes back as their union.

use crate::filling::Filling;
use crate::geometry::{Direction, Index, Indices};
use crate::grid::Grid;
use indexmap::IndexSet;
use std::fmt;

/// Decides whether `candidate` continues a run started by `seed`.
pub type MatchFn<F> = fn(seed: &F, candidate: &F) -> bool;

/// Plain value equality.
pub fn same_filling<F: PartialEq>(seed: &F, candidate: &F) -> bool {
    seed == candidate
}

#[derive(Clone)]
pub struct Matcher<F> {
    fillings: IndexSet<F>,
    min_series: usize,
    predicate: MatchFn<F>,
}

impl<F: Filling> Matcher<F> {
    /// Only cells whose filling is in `fillings` can seed a run.
    pub fn new(fillings: impl IntoIterator<Item = F>, min_series: usize) -> Self {
        Self {
            fillings: fillings.into_iter().collect(),
            min_series,
            predicate: same_filling::<F>,
        }
    }

    /// Replace the match predicate, e.g. to let a joker continue any run.
    pub fn with_predicate(mut self, predicate: MatchFn<F>) -> Self {
        self.predicate = predicate;
        self
    }

    pub fn set_predicate(&mut self, predicate: MatchFn<F>) {
        self.predicate = predicate;
    }

    pub fn fillings(&self) -> &IndexSet<F> {
        &self.fillings
    }

    pub fn min_series(&self) -> usize {
        self.min_series
    }

    pub fn add_fillings(&mut self, fillings: impl IntoIterator<Item = F>) {
        self.fillings.extend(fillings);
    }

    pub fn remove_fillings(&mut self, fillings: &[F]) {
        self.fillings.retain(|f| !fillings.contains(f));
    }

    #[inline]
    pub fn matches(&self, seed: &F, candidate: &F) -> bool {
        (self.predicate)(seed, candidate)
    }

    /// Indices matched at `index`, or an empty set.
    pub fn find_matches(&self, grid: &Grid<F>, index: Index) -> Indices {
        let seed = &grid.cell(index).filling;
        if !self.fillings.contains(seed) {
            return Indices::new();
        }

        let size = grid.size();
        let run = |direction: Direction| {
            index
                .walk(direction)
                .take_while(move |&i| size.contains(i) && self.matches(seed, &grid.cell(i).filling))
        };

        let vertical: Vec<Index> = run(Direction::Upper)
            .chain(run(Direction::Lower))
            .chain(std::iter::once(index))
            .collect();
        let horizontal: Vec<Index> = run(Direction::Right)
            .chain(run(Direction::Left))
            .chain(std::iter::once(index))
            .collect();

        let mut result = Indices::new();
        if vertical.len() >= self.min_series {
            result.extend(vertical);
        }
        if horizontal.len() >= self.min_series {
            result.extend(horizontal);
        }
        result
    }

    /// Union of [`find_matches`](Self::find_matches) over `indices`.
    pub fn find_matched<I>(&self, grid: &Grid<F>, indices: I) -> Indices
    where
        I: IntoIterator<Item = Index>,
    {
        indices
            .into_iter()
            .fold(Indices::new(), |mut result, index| {
                result.extend(self.find_matches(grid, index));
                result
            })
    }

    pub fn find_all_matches(&self, grid: &Grid<F>) -> Indices {
        self.find_matched(grid, grid.all_indices())
    }
}

impl<F: fmt::Debug> fmt::Debug for Matcher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("fillings", &self.fillings)
            .field("min_series", &self.min_series)
            .finish_non_exhaustive()
    }
}
