//! Turn orchestration: swap legality, matching, bonus spawning and refill.
//!
//! A turn as driven by the presentation layer:
//!
//! 1. ask [`Controller::should_swap_cell`] for a proposed pair,
//! 2. [`Controller::swap_and_match_cell`] to perform it and collect matches,
//! 3. [`Controller::resolve_match`] to spawn bonuses, remove and refill,
//! 4. repeat [`Controller::find_all_matches`] + `resolve_match` while the
//!    refill keeps producing matches (chain reactions).
//!
//! Every call runs to completion; the controller never loops across turns
//! by itself, so the caller is free to animate between steps.

use crate::error::ConfigError;
use crate::filling::Filling;
use crate::generator::{Generator, PickFn};
use crate::geometry::{Index, Indices, Size};
use crate::grid::{storage_size, Cell, Grid};
use crate::matcher::{MatchFn, Matcher};
use crate::rng::GameRng;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Smallest allowed grid dimension.
pub const MIN_DIMENSION: i32 = 3;

/// Run length that counts as a match unless configured otherwise.
pub const DEFAULT_MIN_SERIES: usize = 3;

fn default_min_series() -> usize {
    DEFAULT_MIN_SERIES
}

/// How removed cells are replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefillPolicy {
    /// Survivors fall toward row 0 and new cells fill the top of each column.
    #[default]
    Spill,
    /// New cells take exactly the removed slots; nothing moves.
    Regenerate,
}

/// Engine setup. Roles must not overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "F: Deserialize<'de>"))]
pub struct ControllerConfig<F> {
    pub size: Size,
    /// Swappable, matchable, randomly generated.
    pub basic: Vec<F>,
    /// Spawned only where their pattern is found inside a match.
    #[serde(default)]
    pub bonus: Vec<F>,
    /// Never swapped, never matched.
    #[serde(default)]
    pub obstacles: Vec<F>,
    #[serde(default = "default_min_series")]
    pub min_series: usize,
    /// Seed for piece generation and bonus placement; OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl<F: Filling> ControllerConfig<F> {
    pub fn new(size: Size, basic: impl IntoIterator<Item = F>) -> Self {
        Self {
            size,
            basic: basic.into_iter().collect(),
            bonus: Vec::new(),
            obstacles: Vec::new(),
            min_series: DEFAULT_MIN_SERIES,
            seed: None,
        }
    }

    pub fn with_bonus(mut self, bonus: impl IntoIterator<Item = F>) -> Self {
        self.bonus = bonus.into_iter().collect();
        self
    }

    pub fn with_obstacles(mut self, obstacles: impl IntoIterator<Item = F>) -> Self {
        self.obstacles = obstacles.into_iter().collect();
        self
    }

    pub fn with_min_series(mut self, min_series: usize) -> Self {
        self.min_series = min_series;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let Size { columns, rows } = self.size;
        if columns < MIN_DIMENSION || rows < MIN_DIMENSION {
            return Err(ConfigError::GridTooSmall { columns, rows });
        }

        let basic: IndexSet<&F> = self.basic.iter().collect();
        if basic.len() < 2 {
            return Err(ConfigError::TooFewBasics { count: basic.len() });
        }

        if self.min_series < 2 {
            return Err(ConfigError::MinSeriesTooShort {
                min_series: self.min_series,
            });
        }

        let overlap = self
            .bonus
            .iter()
            .find(|f| basic.contains(f) || self.obstacles.contains(f))
            .or_else(|| self.obstacles.iter().find(|f| basic.contains(f)));
        if let Some(filling) = overlap {
            return Err(ConfigError::OverlappingRoles {
                filling: format!("{filling:?}"),
            });
        }

        Ok(())
    }
}

/// Outcome of [`Controller::resolve_match`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound(serialize = "F: Serialize"))]
pub struct MatchResult<F> {
    /// Matched indices that were removed, i.e. without the spawn points.
    pub removed: Indices,
    /// Bonus cells, keyed by where they were placed before any gravity.
    #[serde(serialize_with = "spawned_entries")]
    pub spawned: BTreeMap<Index, Cell<F>>,
    /// Slots that received a fresh cell.
    pub refilled: Indices,
}

/// Map keys are structs, so write the spawns as a list of entries.
fn spawned_entries<S, F>(spawned: &BTreeMap<Index, Cell<F>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    F: Serialize,
{
    #[derive(Serialize)]
    struct Entry<'a, F> {
        index: Index,
        cell: &'a Cell<F>,
    }

    serializer.collect_seq(
        spawned
            .iter()
            .map(|(&index, cell)| Entry { index, cell }),
    )
}

/// Owns the live grid and every mutation of it.
#[derive(Debug, Clone)]
pub struct Controller<F> {
    bonus: Vec<F>,
    obstacles: Vec<F>,
    grid: Grid<F>,
    generator: Generator<F>,
    matcher: Matcher<F>,
}

impl<F: Filling> Controller<F> {
    /// Builds the engine and generates a fresh board.
    pub fn new(config: ControllerConfig<F>) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut generator = Self::generator_for(&config)?;
        let grid = generator.generate_grid(config.size);
        Ok(Self::assemble(config, grid, generator))
    }

    /// Builds the engine around an existing board, e.g. one restored from
    /// a save. New identities continue above the largest one on the board.
    pub fn with_grid(config: ControllerConfig<F>, grid: Grid<F>) -> Result<Self, ConfigError> {
        config.validate()?;
        if !grid.is_well_formed() || grid.size() != config.size {
            return Err(ConfigError::GridMismatch {
                expected: config.size,
                found: storage_size(grid.columns()),
            });
        }

        let mut generator = Self::generator_for(&config)?;
        let max_id = grid
            .columns()
            .iter()
            .flat_map(|column| column.iter().map(|cell| cell.id))
            .max();
        if let Some(id) = max_id {
            generator.reserve_ids_through(id)?;
        }
        Ok(Self::assemble(config, grid, generator))
    }

    fn generator_for(config: &ControllerConfig<F>) -> Result<Generator<F>, ConfigError> {
        Generator::new(
            config.basic.iter().cloned(),
            GameRng::from_optional_seed(config.seed),
        )
    }

    fn assemble(config: ControllerConfig<F>, grid: Grid<F>, generator: Generator<F>) -> Self {
        let matcher = Matcher::new(config.basic, config.min_series);
        Self {
            bonus: config.bonus,
            obstacles: config.obstacles,
            grid,
            generator,
            matcher,
        }
    }

    // ─── Queries ────────────────────────────────────────────────────────────

    pub fn grid(&self) -> &Grid<F> {
        &self.grid
    }

    pub fn size(&self) -> Size {
        self.grid.size()
    }

    pub fn cell(&self, at: Index) -> &Cell<F> {
        self.grid.cell(at)
    }

    pub fn all_indices(&self) -> Vec<Index> {
        self.grid.all_indices()
    }

    pub fn all_indices_of(&self, filling: &F) -> Vec<Index> {
        self.grid.all_indices_of(filling)
    }

    pub fn basic(&self) -> &IndexSet<F> {
        self.generator.fillings()
    }

    pub fn bonus(&self) -> &[F] {
        &self.bonus
    }

    pub fn obstacles(&self) -> &[F] {
        &self.obstacles
    }

    pub fn min_series(&self) -> usize {
        self.matcher.min_series()
    }

    pub fn is_basic(&self, at: Index) -> bool {
        self.basic().contains(&self.grid.cell(at).filling)
    }

    pub fn is_bonus(&self, at: Index) -> bool {
        self.bonus.contains(&self.grid.cell(at).filling)
    }

    pub fn is_obstacle(&self, at: Index) -> bool {
        self.obstacles.contains(&self.grid.cell(at).filling)
    }

    // ─── Strategies ─────────────────────────────────────────────────────────

    pub fn set_match_predicate(&mut self, predicate: MatchFn<F>) {
        self.matcher.set_predicate(predicate);
    }

    pub fn set_pick(&mut self, pick: PickFn<F>) {
        self.generator.set_pick(pick);
    }

    // ─── Swap ───────────────────────────────────────────────────────────────

    /// Both indices on the board, adjacent, and neither an obstacle.
    pub fn can_swap_cell(&self, index: Index, target: Index) -> bool {
        let size = self.size();
        size.contains(index)
            && size.contains(target)
            && index.is_neighboring(target)
            && !self.is_obstacle(index)
            && !self.is_obstacle(target)
    }

    /// [`can_swap_cell`](Self::can_swap_cell) and the swap would match.
    pub fn should_swap_cell(&self, index: Index, target: Index) -> bool {
        self.can_swap_cell(index, target) && self.has_matches_exchanging(index, target)
    }

    /// Tries the swap on a copy of the board; the live grid is untouched.
    pub fn has_matches_exchanging(&self, index: Index, target: Index) -> bool {
        let mut trial = self.grid.clone();
        trial.swap_cell(index, target);
        !self.matcher.find_matches(&trial, index).is_empty()
            || !self.matcher.find_matches(&trial, target).is_empty()
    }

    pub fn swap_cell(&mut self, index: Index, target: Index) {
        self.grid.swap_cell(index, target);
    }

    /// Swaps on the live grid and returns the matches at both ends.
    /// Nothing is removed.
    pub fn swap_and_match_cell(&mut self, index: Index, target: Index) -> Indices {
        self.grid.swap_cell(index, target);
        let mut matched = self.matcher.find_matches(&self.grid, index);
        matched.extend(self.matcher.find_matches(&self.grid, target));
        matched
    }

    /// First swappable pair, in board order, that would produce a match.
    pub fn find_possible_swap(&self) -> Option<(Index, Index)> {
        self.grid.all_indices().into_iter().find_map(|index| {
            index
                .neighbors()
                .into_iter()
                .find(|&neighbor| self.should_swap_cell(index, neighbor))
                .map(|neighbor| (index, neighbor))
        })
    }

    // ─── Matching ───────────────────────────────────────────────────────────

    pub fn find_all_matches(&self) -> Indices {
        self.matcher.find_all_matches(&self.grid)
    }

    /// Resolves a confirmed match.
    ///
    /// Each bonus whose pattern appears in `indices` is spawned inside the
    /// detected shape: at the smallest index shared with `swap_indices`, or
    /// at a random index of the shape when the swap did not touch it. Spawn
    /// points are kept; the remaining indices are removed and refilled
    /// according to `policy`.
    pub fn resolve_match(
        &mut self,
        indices: &Indices,
        swap_indices: &Indices,
        policy: RefillPolicy,
    ) -> MatchResult<F> {
        let mut spawned = BTreeMap::new();
        let mut removed = indices.clone();

        for bonus in self.bonus.clone() {
            let detected = bonus.pattern().detect_in(indices);
            let preferred = detected.intersection(swap_indices).next().copied();
            let Some(spawn_at) = preferred.or_else(|| self.generator.rng().choose(&detected).copied())
            else {
                continue;
            };

            let cell = self.spawn(bonus, spawn_at);
            spawned.insert(spawn_at, cell);
            removed.remove(&spawn_at);
        }

        let refilled = self.remove(&removed, policy);
        MatchResult {
            removed,
            spawned,
            refilled,
        }
    }

    /// Removes `indices` and refills; returns the slots that got new cells.
    pub fn remove(&mut self, indices: &Indices, policy: RefillPolicy) -> Indices {
        let refill = match policy {
            RefillPolicy::Spill => self.grid.remove(indices),
            RefillPolicy::Regenerate => indices.clone(),
        };
        self.generator.fill(&mut self.grid, &refill);
        refill
    }

    /// Places a fresh cell of `filling` at `at`.
    pub fn spawn(&mut self, filling: F, at: Index) -> Cell<F> {
        let cell = self.generator.generate(at, Some(filling));
        self.grid.set_cell(cell.clone(), at);
        cell
    }

    // ─── Palette ────────────────────────────────────────────────────────────

    /// Adds basic fillings to both generation and matching. Fails, changing
    /// nothing, if one of them is already a bonus or an obstacle.
    pub fn add_basic(&mut self, fillings: impl IntoIterator<Item = F>) -> Result<(), ConfigError> {
        let fillings: Vec<F> = fillings.into_iter().collect();
        let taken = fillings
            .iter()
            .find(|f| self.bonus.contains(f) || self.obstacles.contains(f));
        if let Some(filling) = taken {
            return Err(ConfigError::OverlappingRoles {
                filling: format!("{filling:?}"),
            });
        }

        self.generator.add_fillings(fillings.iter().cloned());
        self.matcher.add_fillings(fillings);
        Ok(())
    }

    /// Removes basic fillings from generation and matching.
    ///
    /// Shrinking the palette below two fillings is not fatal here: the call
    /// returns [`ConfigError::TooFewBasics`] and the palette stays as it was,
    /// so the running game keeps a valid palette.
    pub fn remove_basic(&mut self, fillings: &[F]) -> Result<(), ConfigError> {
        self.generator.remove_fillings(fillings)?;
        self.matcher.remove_fillings(fillings);
        Ok(())
    }
}
