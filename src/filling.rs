//! The piece-variant abstraction.

use crate::pattern::Pattern;
use std::fmt::Debug;
use std::hash::Hash;

/// A kind of piece that can occupy a cell.
///
/// Fillings are compared by value. Whether a filling is basic, bonus or an
/// obstacle is decided by the controller configuration, not by the type.
/// Bonus fillings are spawned where their [`Pattern`] is found inside a
/// match; other fillings usually return [`Pattern::empty`].
pub trait Filling: Clone + Eq + Hash + Debug {
    fn pattern(&self) -> Pattern;
}
