//! D4 symmetry group operations for board canonicalization

use serde::{Deserialize, Serialize};

use super::board::BoardState;
use crate::types::Position;

/// D4 symmetry transformation (dihedral group of the square).
///
/// A transform reflects left-right first (when `reflection` is set) and then
/// rotates clockwise by `quarter_turns` × 90°.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct D4Transform {
    pub quarter_turns: u8,
    pub reflection: bool,
}

impl D4Transform {
    pub const IDENTITY: D4Transform = D4Transform {
        quarter_turns: 0,
        reflection: false,
    };

    /// All 8 transforms: identity, 3 rotations, the flip, and 3 flip-then-rotate.
    pub const ALL: [D4Transform; 8] = [
        D4Transform::new(0, false),
        D4Transform::new(1, false),
        D4Transform::new(2, false),
        D4Transform::new(3, false),
        D4Transform::new(0, true),
        D4Transform::new(1, true),
        D4Transform::new(2, true),
        D4Transform::new(3, true),
    ];

    pub const fn new(quarter_turns: u8, reflection: bool) -> Self {
        D4Transform {
            quarter_turns: quarter_turns % 4,
            reflection,
        }
    }

    /// Destination index of cell `idx` under this transform
    pub fn transform_index(&self, idx: usize) -> usize {
        let (mut row, mut col) = (idx / 3, idx % 3);

        if self.reflection {
            col = 2 - col;
        }

        for _ in 0..self.quarter_turns {
            (row, col) = (col, 2 - row);
        }

        row * 3 + col
    }

    pub fn transform_position(&self, pos: Position) -> Position {
        Position::from_index_unchecked(self.transform_index(pos.index()))
    }

    /// Apply transform to an array of cells
    pub fn apply_to_cells(&self, cells: &[i8; 9]) -> [i8; 9] {
        let mut transformed = [0i8; 9];
        for (idx, &cell) in cells.iter().enumerate() {
            transformed[self.transform_index(idx)] = cell;
        }
        transformed
    }

    /// Get the inverse transform
    pub fn inverse(&self) -> D4Transform {
        if self.reflection {
            // rotate ∘ reflect is an involution
            *self
        } else {
            D4Transform::new((4 - self.quarter_turns) % 4, false)
        }
    }
}

impl Default for D4Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl BoardState {
    /// Apply a D4 transform to the board; the side to move is unchanged.
    pub fn transform(&self, t: &D4Transform) -> Self {
        BoardState {
            cells: t.apply_to_cells(&self.cells),
            to_move: self.to_move,
        }
    }
}
