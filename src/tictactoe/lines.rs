//! Winning line analysis

use super::{Player, board::MAX_RANK};
use crate::types::Position;

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines on ranked cells
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// A player has won when every cell of some line carries their sign.
    pub fn has_won(cells: &[i8; 9], player: Player) -> bool {
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| player.owns(cells[idx])))
    }

    /// Moves that complete a line for `player` on their next turn.
    ///
    /// Placing a mark ages the player's older marks, so a rank-1 mark in the line
    /// disappears before the line is checked and does not count.
    pub fn winning_moves(cells: &[i8; 9], player: Player) -> Vec<Position> {
        let mut moves: Vec<Position> = WINNING_LINES
            .iter()
            .filter_map(|line| Self::winning_move_in_line(cells, player, line))
            .collect();
        moves.sort_unstable();
        moves.dedup();
        moves
    }

    fn winning_move_in_line(
        cells: &[i8; 9],
        player: Player,
        line: &[usize; 3],
    ) -> Option<Position> {
        let mut surviving = 0;
        let mut empty = None;

        for &idx in line {
            let cell = cells[idx];
            if cell == 0 {
                if empty.is_some() {
                    return None;
                }
                empty = Some(idx);
            } else if player.owns(cell) && cell.abs() > 1 && cell.abs() <= MAX_RANK {
                surviving += 1;
            } else {
                return None;
            }
        }

        match (surviving, empty) {
            (2, Some(idx)) => Some(Position::from_index_unchecked(idx)),
            _ => None,
        }
    }
}
