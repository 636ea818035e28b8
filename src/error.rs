//! Errors raised while configuring an engine.
//!
//! These are the only recoverable failures the crate reports. Gameplay
//! questions such as an illegal swap are answered with `bool` or empty
//! results instead.

use crate::geometry::Size;
use crate::grid::CellId;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Either dimension is below [`MIN_DIMENSION`](crate::controller::MIN_DIMENSION).
    GridTooSmall { columns: i32, rows: i32 },
    /// The basic palette would hold fewer than two distinct fillings.
    TooFewBasics { count: usize },
    /// Runs shorter than two cells cannot form a match.
    MinSeriesTooShort { min_series: usize },
    /// A filling was listed under more than one role.
    OverlappingRoles { filling: String },
    /// A restored grid does not have the configured shape.
    GridMismatch { expected: Size, found: Size },
    /// A restored grid holds an identity too close to `u64::MAX` to
    /// continue numbering above it.
    IdsExhausted { id: CellId },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridTooSmall { columns, rows } => {
                write!(f, "grid must be at least 3x3, got {columns}x{rows}")
            }
            Self::TooFewBasics { count } => {
                write!(f, "need more than one basic filling, got {count}")
            }
            Self::MinSeriesTooShort { min_series } => {
                write!(f, "minimum series must be at least 2, got {min_series}")
            }
            Self::OverlappingRoles { filling } => {
                write!(f, "filling {filling} is assigned to more than one role")
            }
            Self::GridMismatch { expected, found } => write!(
                f,
                "grid shape {}x{} does not match configured {}x{}",
                found.columns, found.rows, expected.columns, expected.rows
            ),
            Self::IdsExhausted { id } => {
                write!(f, "cell id {} leaves no identities to hand out", id.0)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ConfigError::GridTooSmall { columns: 2, rows: 5 };
        assert_eq!(err.to_string(), "grid must be at least 3x3, got 2x5");

        let err = ConfigError::GridMismatch {
            expected: Size::new(6, 6),
            found: Size::new(6, 5),
        };
        assert_eq!(
            err.to_string(),
            "grid shape 6x5 does not match configured 6x6"
        );

        let err = ConfigError::IdsExhausted { id: CellId(u64::MAX) };
        assert_eq!(
            err.to_string(),
            "cell id 18446744073709551615 leaves no identities to hand out"
        );
    }
}
