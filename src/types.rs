//! Newtype wrappers for improved type safety and domain modeling.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell on the board, addressed by flat row-major index (0-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Position(u8);

impl Position {
    /// Create a new position, validating it's within board bounds.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPosition`] if the position is >= 9.
    pub fn new(value: usize) -> Result<Self, crate::Error> {
        if value < 9 {
            Ok(Position(value as u8))
        } else {
            Err(crate::Error::InvalidPosition { position: value })
        }
    }

    /// Create a position from a (row, column) pair.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPosition`] if either coordinate is >= 3.
    pub fn from_row_col(row: usize, col: usize) -> Result<Self, crate::Error> {
        if row < 3 && col < 3 {
            Ok(Position((row * 3 + col) as u8))
        } else {
            Err(crate::Error::InvalidPosition {
                position: row * 3 + col,
            })
        }
    }

    /// Flat index, for indexing into cell arrays.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn row(self) -> usize {
        self.index() / 3
    }

    pub fn col(self) -> usize {
        self.index() % 3
    }

    /// All nine positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0u8..9).map(Position)
    }

    /// Position from an index already known to be in range.
    pub(crate) const fn from_index_unchecked(index: usize) -> Self {
        debug_assert!(index < 9);
        Position(index as u8)
    }
}

impl From<Position> for usize {
    fn from(pos: Position) -> Self {
        pos.index()
    }
}

impl From<Position> for u8 {
    fn from(pos: Position) -> Self {
        pos.0
    }
}

impl TryFrom<u8> for Position {
    type Error = crate::Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Position::new(value as usize)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (row {}, col {})", self.0, self.row(), self.col())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_col_round_trip() {
        for pos in Position::all() {
            let again = Position::from_row_col(pos.row(), pos.col()).unwrap();
            assert_eq!(pos, again);
        }
    }

    #[test]
    fn out_of_range_positions_are_rejected() {
        assert!(Position::new(9).is_err());
        assert!(Position::from_row_col(3, 0).is_err());
        assert!(Position::from_row_col(0, 3).is_err());
    }
}
