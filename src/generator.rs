//! Piece generation: fresh cells, full boards, and refills.
//!
//! The generator owns the basic palette, the random source and the identity
//! counter. Which filling a new cell receives is decided by a pick strategy
//! (uniform over the palette unless replaced with [`Generator::with_pick`]).

use crate::error::ConfigError;
use crate::filling::Filling;
use crate::geometry::{Index, Indices, Size};
use crate::grid::{Cell, CellId, Grid};
use crate::rng::GameRng;
use indexmap::IndexSet;
use std::fmt;

/// Chooses the filling for a new cell at the given index.
pub type PickFn<F> = fn(&IndexSet<F>, Index, &mut GameRng) -> F;

/// Uniform draw over the palette.
///
/// Panics on an empty palette; the generator's own checks keep at least two
/// fillings, so reaching this with none is a bug.
pub fn uniform_pick<F: Clone>(fillings: &IndexSet<F>, _at: Index, rng: &mut GameRng) -> F {
    assert!(!fillings.is_empty(), "random draw from an empty palette");
    fillings[rng.gen_range(fillings.len())].clone()
}

#[derive(Clone)]
pub struct Generator<F> {
    fillings: IndexSet<F>,
    rng: GameRng,
    next_id: u64,
    pick: PickFn<F>,
}

impl<F: Filling> Generator<F> {
    /// Needs more than one distinct filling; with a single one every
    /// refill would be an immediate match.
    pub fn new(fillings: impl IntoIterator<Item = F>, rng: GameRng) -> Result<Self, ConfigError> {
        let fillings: IndexSet<F> = fillings.into_iter().collect();
        if fillings.len() < 2 {
            return Err(ConfigError::TooFewBasics {
                count: fillings.len(),
            });
        }
        Ok(Self {
            fillings,
            rng,
            next_id: 0,
            pick: uniform_pick::<F>,
        })
    }

    /// Replace the pick strategy.
    pub fn with_pick(mut self, pick: PickFn<F>) -> Self {
        self.pick = pick;
        self
    }

    pub fn set_pick(&mut self, pick: PickFn<F>) {
        self.pick = pick;
    }

    pub fn fillings(&self) -> &IndexSet<F> {
        &self.fillings
    }

    pub fn rng(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    /// Makes sure the next identity handed out is greater than `id`.
    ///
    /// Fails when `id` leaves no identity above it to hand out.
    pub fn reserve_ids_through(&mut self, id: CellId) -> Result<(), ConfigError> {
        let next = id
            .0
            .checked_add(1)
            .filter(|&next| next < u64::MAX)
            .ok_or(ConfigError::IdsExhausted { id })?;
        self.next_id = self.next_id.max(next);
        Ok(())
    }

    /// A full board of fresh cells.
    pub fn generate_grid(&mut self, size: Size) -> Grid<F> {
        let columns = (0..size.columns)
            .map(|column| {
                (0..size.rows)
                    .map(|row| self.generate(Index::new(column, row), None))
                    .collect()
            })
            .collect();
        Grid::from_parts(size, columns)
    }

    /// One fresh cell. Draws the filling when `filling` is `None`.
    ///
    /// Panics once every identity below `u64::MAX` has been handed out.
    pub fn generate(&mut self, at: Index, filling: Option<F>) -> Cell<F> {
        assert!(self.next_id < u64::MAX, "cell identities exhausted");
        let filling = match filling {
            Some(filling) => filling,
            None => (self.pick)(&self.fillings, at, &mut self.rng),
        };
        let id = CellId(self.next_id);
        self.next_id += 1;
        Cell::new(id, filling)
    }

    /// Replaces every cell at `indices` with a fresh one.
    pub fn fill(&mut self, grid: &mut Grid<F>, indices: &Indices) {
        for &index in indices {
            let cell = self.generate(index, None);
            grid.set_cell(cell, index);
        }
    }

    pub fn add_fillings(&mut self, fillings: impl IntoIterator<Item = F>) {
        self.fillings.extend(fillings);
    }

    /// Leaves the palette untouched and fails if fewer than two fillings
    /// would remain.
    pub fn remove_fillings(&mut self, fillings: &[F]) -> Result<(), ConfigError> {
        let remaining = self
            .fillings
            .iter()
            .filter(|f| !fillings.contains(f))
            .count();
        if remaining < 2 {
            return Err(ConfigError::TooFewBasics { count: remaining });
        }
        self.fillings.retain(|f| !fillings.contains(f));
        Ok(())
    }
}

impl<F: fmt::Debug> fmt::Debug for Generator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("fillings", &self.fillings)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}
