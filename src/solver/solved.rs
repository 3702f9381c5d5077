//! Frozen result of a full solve

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Evaluation, EvaluationSource};
use crate::{
    tictactoe::{BoardState, StateKey},
    types::Position,
};

/// Solved data for one canonical state. Moves are in canonical coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolvedEntry {
    /// Normalized score, positive when X wins
    pub score: i8,
    /// Sorted moves attaining the optimal child value; empty only when terminal
    pub best_moves: Vec<Position>,
    pub terminal: bool,
    /// Every legal move with the canonical key it leads to
    pub children: Vec<(Position, StateKey)>,
}

/// Value table and best-move table for every reachable canonical state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolvedTable {
    entries: BTreeMap<StateKey, SolvedEntry>,
    root: StateKey,
    win_score: i8,
    passes: usize,
}

impl SolvedTable {
    pub fn new(
        entries: BTreeMap<StateKey, SolvedEntry>,
        root: StateKey,
        win_score: i8,
        passes: usize,
    ) -> Self {
        Self {
            entries,
            root,
            win_score,
            passes,
        }
    }

    pub fn get(&self, key: &StateKey) -> Option<&SolvedEntry> {
        self.entries.get(key)
    }

    pub fn score(&self, key: &StateKey) -> Option<i8> {
        self.entries.get(key).map(|entry| entry.score)
    }

    pub fn best_moves(&self, key: &StateKey) -> Option<&[Position]> {
        self.entries.get(key).map(|entry| entry.best_moves.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, &SolvedEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical key of the initial position
    pub fn root(&self) -> StateKey {
        self.root
    }

    /// Normalized magnitude of a terminal position
    pub fn win_score(&self) -> i8 {
        self.win_score
    }

    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Plies from a decided position to the end of the game under optimal play.
    ///
    /// `None` for drawn scores and for magnitudes above the terminal score,
    /// which no solve produces.
    pub fn distance_to_outcome(&self, score: i8) -> Option<u32> {
        if score == 0 {
            return None;
        }
        u32::try_from(self.win_score as i32 - (score as i32).abs()).ok()
    }

    /// Look up any state, mapping best moves back into its own coordinates.
    pub fn lookup(&self, state: &BoardState) -> Option<Evaluation> {
        let ctx = state.canonical_context();
        let entry = self.entries.get(&ctx.key)?;
        let mut best_moves: Vec<Position> = entry
            .best_moves
            .iter()
            .map(|&mv| ctx.map_canonical_to_original(mv))
            .collect();
        best_moves.sort_unstable();

        Some(Evaluation {
            score: entry.score as i32,
            best_moves,
            source: EvaluationSource::SolvedTable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(win_score: i8) -> SolvedTable {
        let root = BoardState::new().encode();
        SolvedTable::new(BTreeMap::new(), root, win_score, 1)
    }

    #[test]
    fn distance_counts_plies_from_the_terminal_magnitude() {
        let table = table(6);
        assert_eq!(table.distance_to_outcome(6), Some(0));
        assert_eq!(table.distance_to_outcome(-6), Some(0));
        assert_eq!(table.distance_to_outcome(5), Some(1));
        assert_eq!(table.distance_to_outcome(-1), Some(5));
        assert_eq!(table.distance_to_outcome(0), None);
    }

    #[test]
    fn magnitude_above_terminal_has_no_distance() {
        let table = table(6);
        assert_eq!(table.distance_to_outcome(7), None);
        assert_eq!(table.distance_to_outcome(-100), None);
        assert_eq!(table.distance_to_outcome(i8::MIN), None);
    }
}
