//! Bonus shapes and their detection inside a set of matched indices.

use crate::geometry::{Index, Indices};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A shape given as offsets from an implicit origin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pattern {
    pub offsets: Indices,
}

impl Pattern {
    pub fn new(offsets: impl IntoIterator<Item = Index>) -> Self {
        Self {
            offsets: offsets.into_iter().collect(),
        }
    }

    /// The shape of a piece that never spawns from a match.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Horizontal line of `length` cells starting at the origin.
    pub fn line(length: i32) -> Self {
        Self::new((0..length).map(|c| Index::new(c, 0)))
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// The quarter-turn variant: every offset has column and row exchanged.
    pub fn rotated(&self) -> Self {
        Self::new(self.offsets.iter().map(|o| o.transposed()))
    }

    /// Finds this shape, or its rotated variant, inside `indices`.
    ///
    /// Returns the translated shape, or an empty set when neither
    /// orientation fits. The own orientation is tried first.
    pub fn detect_in(&self, indices: &Indices) -> Indices {
        let detected = self.detect_exact_in(indices);
        if !detected.is_empty() {
            return detected;
        }
        self.rotated().detect_exact_in(indices)
    }

    /// Finds this shape, in its own orientation only, inside `indices`.
    ///
    /// Candidate translations are every pair of a column and a row present
    /// in `indices`; columns are tried in ascending order, and for each
    /// column the rows ascending. The first translation whose shape is a
    /// subset of `indices` is returned.
    pub fn detect_exact_in(&self, indices: &Indices) -> Indices {
        if self.offsets.is_empty() || indices.is_empty() {
            return Indices::new();
        }

        let columns: BTreeSet<i32> = indices.iter().map(|i| i.column).collect();
        let rows: BTreeSet<i32> = indices.iter().map(|i| i.row).collect();

        for &column in &columns {
            for &row in &rows {
                let figure: Indices = self.offsets.iter().map(|o| o.offset(column, row)).collect();
                if figure.is_subset(indices) {
                    return figure;
                }
            }
        }

        Indices::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(points: &[(i32, i32)]) -> Indices {
        points.iter().map(|&p| Index::from(p)).collect()
    }

    fn corner() -> Pattern {
        // ###
        // #
        // #   (row 0 at the bottom)
        Pattern::new(set(&[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]))
    }

    #[test]
    fn test_empty_pattern_never_detects() {
        let indices = set(&[(0, 0), (1, 0), (2, 0)]);
        assert!(Pattern::empty().detect_in(&indices).is_empty());
        assert!(Pattern::empty().detect_exact_in(&indices).is_empty());
    }

    #[test]
    fn test_detects_translated_line() {
        let indices = set(&[(2, 4), (3, 4), (4, 4), (5, 4)]);
        let detected = Pattern::line(4).detect_in(&indices);
        assert_eq!(detected, indices);
    }

    #[test]
    fn test_detects_rotated_line() {
        let vertical = set(&[(1, 0), (1, 1), (1, 2), (1, 3)]);
        assert!(Pattern::line(4).detect_exact_in(&vertical).is_empty());
        assert_eq!(Pattern::line(4).detect_in(&vertical), vertical);
    }

    #[test]
    fn test_line_too_short_is_not_detected() {
        let indices = set(&[(0, 0), (1, 0), (2, 0)]);
        assert!(Pattern::line(4).detect_in(&indices).is_empty());
    }

    #[test]
    fn test_first_translation_wins() {
        // Five in a row contains two placements of a line of four; the
        // smallest column is tried first.
        let indices = set(&[(0, 1), (1, 1), (2, 1), (3, 1), (4, 1)]);
        let detected = Pattern::line(4).detect_in(&indices);
        assert_eq!(detected, set(&[(0, 1), (1, 1), (2, 1), (3, 1)]));
    }

    #[test]
    fn test_own_orientation_preferred() {
        // A plus sign contains the line of three both ways.
        let plus = set(&[(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)]);
        let detected = Pattern::line(3).detect_in(&plus);
        assert_eq!(detected, set(&[(0, 1), (1, 1), (2, 1)]));
    }

    #[test]
    fn test_detects_corner_inside_larger_match() {
        let indices = set(&[
            (3, 0), (3, 1), (3, 2), (4, 2), (5, 2), // corner
            (0, 5), (1, 5),                          // unrelated
        ]);
        let detected = corner().detect_in(&indices);
        assert_eq!(detected, set(&[(3, 0), (3, 1), (3, 2), (4, 2), (5, 2)]));
    }

    #[test]
    fn test_rotated_swaps_axes() {
        let rotated = corner().rotated();
        assert_eq!(
            rotated.offsets,
            set(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)])
        );
        assert_eq!(rotated.rotated(), corner());
    }

    proptest! {
        #[test]
        fn detection_is_rotation_symmetric(
            points in proptest::collection::btree_set((0i32..6, 0i32..6), 0..20),
            shape in prop_oneof![Just(corner()), Just(Pattern::line(3)), Just(Pattern::line(4))],
        ) {
            let indices: Indices = points.iter().map(|&p| Index::from(p)).collect();
            let transposed: Indices = indices.iter().map(|i| i.transposed()).collect();

            let found = shape.detect_in(&indices);
            let found_rotated = shape.rotated().detect_in(&transposed);

            prop_assert_eq!(found.is_empty(), found_rotated.is_empty());
            prop_assert!(found.is_subset(&indices));
            prop_assert!(found_rotated.is_subset(&transposed));
        }
    }
}
