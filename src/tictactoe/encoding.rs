//! Compact positional encoding and symmetry canonicalization.
//!
//! Every nonzero rank appears at most once on a board, so a board is fully
//! described by where each of the six ranks sits. Each location takes a nibble
//! (cell index 0-8, or [`ABSENT`]), giving 3 bytes per board. A fourth byte holds
//! the side to move.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    board::{BoardState, Player},
    symmetry::D4Transform,
};
use crate::types::Position;

/// Nibble marking a rank that is not on the board
pub const ABSENT: u8 = 0xF;

/// Rank stored in each nibble slot, most significant nibble first
pub const SLOT_RANKS: [i8; 6] = [3, 2, 1, -3, -2, -1];

/// Packed state key: three board bytes followed by the turn byte.
///
/// Keys compare lexicographically by byte, which is what canonicalization
/// minimizes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct StateKey([u8; 4]);

impl StateKey {
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        StateKey(bytes)
    }

    pub fn bytes(&self) -> [u8; 4] {
        self.0
    }

    /// The 3-byte board encoding, shared by both turn perspectives of a board.
    pub fn board_bytes(&self) -> [u8; 3] {
        [self.0[0], self.0[1], self.0[2]]
    }

    /// Raw turn byte (0 = X, 1 = O for well-formed keys)
    pub fn turn_byte(&self) -> u8 {
        self.0[3]
    }

    /// Key of the same board with the other side to move.
    pub fn partner(&self) -> StateKey {
        let mut bytes = self.0;
        bytes[3] ^= 1;
        StateKey(bytes)
    }

    /// Big-endian integer value of the key, as used by the JSON export.
    pub fn as_u32(&self) -> u32 {
        u32::from_be_bytes(self.0)
    }
}

impl From<u32> for StateKey {
    fn from(value: u32) -> Self {
        StateKey(value.to_be_bytes())
    }
}

impl From<StateKey> for u32 {
    fn from(key: StateKey) -> Self {
        key.as_u32()
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}{:02x}{:02x}:{}",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

fn slot_of(rank: i8) -> Option<usize> {
    SLOT_RANKS.iter().position(|&r| r == rank)
}

fn turn_byte(player: Player) -> u8 {
    match player {
        Player::X => 0,
        Player::O => 1,
    }
}

/// Pack a board and its turn into a [`StateKey`].
///
/// Assumes the rank-uniqueness invariant; see [`BoardState::is_valid`].
pub fn encode(state: &BoardState) -> StateKey {
    let mut nibbles = [ABSENT; 6];
    for (idx, &cell) in state.cells.iter().enumerate() {
        if let Some(slot) = slot_of(cell) {
            nibbles[slot] = idx as u8;
        }
    }

    StateKey([
        (nibbles[0] << 4) | nibbles[1],
        (nibbles[2] << 4) | nibbles[3],
        (nibbles[4] << 4) | nibbles[5],
        turn_byte(state.to_move),
    ])
}

/// Unpack a [`StateKey`]; exact inverse of [`encode`] for valid states.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidEncoding`] for nibbles other than 0-8 or
/// [`ABSENT`], two ranks on one cell, or a turn byte other than 0/1.
pub fn decode(key: StateKey) -> Result<BoardState, crate::Error> {
    let bytes = key.bytes();
    let invalid = |reason: String| crate::Error::InvalidEncoding {
        bytes,
        reason,
    };

    let to_move = match bytes[3] {
        0 => Player::X,
        1 => Player::O,
        other => return Err(invalid(format!("turn byte {other} is not 0 or 1"))),
    };

    let mut cells = [0i8; 9];
    for (slot, &rank) in SLOT_RANKS.iter().enumerate() {
        let byte = bytes[slot / 2];
        let nibble = if slot % 2 == 0 { byte >> 4 } else { byte & 0x0F };
        if nibble == ABSENT {
            continue;
        }
        let idx = nibble as usize;
        if idx >= 9 {
            return Err(invalid(format!("rank {rank} points at cell {idx}")));
        }
        if cells[idx] != 0 {
            return Err(invalid(format!("cell {idx} holds two ranks")));
        }
        cells[idx] = rank;
    }

    Ok(BoardState { cells, to_move })
}

/// Cached result of canonicalization for efficient repeated operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalContext {
    /// The canonical board state
    pub state: BoardState,
    /// The transform that maps the original state to the canonical state
    pub transform: D4Transform,
    /// Key of the canonical state
    pub key: StateKey,
}

impl CanonicalContext {
    /// Map a move from original coordinates to canonical coordinates
    pub fn map_move_to_canonical(&self, original_move: Position) -> Position {
        self.transform.transform_position(original_move)
    }

    /// Map a move from canonical coordinates back to original coordinates
    pub fn map_canonical_to_original(&self, canonical_move: Position) -> Position {
        self.transform.inverse().transform_position(canonical_move)
    }
}

impl BoardState {
    /// Packed key of this exact (non-canonical) state
    pub fn encode(&self) -> StateKey {
        encode(self)
    }

    /// Find the lexicographically smallest key among the 8 symmetry images.
    ///
    /// The turn byte is invariant under symmetry, so the minimum is decided by the
    /// board bytes and both turn perspectives of a board pick the same image.
    pub fn canonical_context(&self) -> CanonicalContext {
        let mut best = CanonicalContext {
            state: *self,
            transform: D4Transform::IDENTITY,
            key: encode(self),
        };

        for transform in D4Transform::ALL.into_iter().skip(1) {
            let image = self.transform(&transform);
            let key = encode(&image);
            if key < best.key {
                best = CanonicalContext {
                    state: image,
                    transform,
                    key,
                };
            }
        }

        best
    }

    pub fn canonical_key(&self) -> StateKey {
        self.canonical_context().key
    }

    pub fn canonical(&self) -> Self {
        self.canonical_context().state
    }
}
