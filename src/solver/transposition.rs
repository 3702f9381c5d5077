//! Transposition table for the online engine
//!
//! Entries are keyed by canonical [`StateKey`], so all eight symmetric images of
//! a position share one slot. Stored moves are in canonical coordinates.
//!
//! A decided search score depends on the remaining depth it was searched with:
//! an outcome `k` plies below a node searched `d` plies deep scores
//! `±(d + 1 - k)`. The table keeps `k` instead, and re-expresses the score for
//! whatever remaining depth the caller asks at. An outcome further away than
//! the caller's horizon is not reported.

use std::collections::HashMap;

use crate::{tictactoe::StateKey, types::Position};

/// Magnitude offset for stored outcomes; must exceed any searchable depth.
const OUTCOME: i32 = 100_000;

/// How a stored score relates to the true negamax value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The search completed inside the window
    Exact,
    /// Failed high: true score >= stored score
    Lower,
    /// Failed low: true score <= stored score
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtEntry {
    /// Score from the perspective of the side to move, at the remaining depth
    /// it was stored or looked up with
    pub score: i32,
    pub best_move: Option<Position>,
    /// Remaining depth the score was searched with
    pub depth: u32,
    pub bound: Bound,
}

/// Stored form: decided scores as `±(OUTCOME - plies to outcome)`, 0 otherwise
#[derive(Debug, Clone, Copy)]
struct Slot {
    outcome: i32,
    best_move: Option<Position>,
    depth: u32,
    bound: Bound,
}

fn to_outcome(score: i32, depth: u32) -> i32 {
    if score == 0 {
        return 0;
    }
    let plies = depth as i32 + 1 - score.abs();
    score.signum() * (OUTCOME - plies)
}

fn from_outcome(outcome: i32, depth: u32) -> Option<i32> {
    if outcome == 0 {
        return Some(0);
    }
    let plies = OUTCOME - outcome.abs();
    if plies > depth as i32 {
        return None;
    }
    Some(outcome.signum() * (depth as i32 + 1 - plies))
}

#[derive(Debug, Clone, Default)]
pub struct TranspositionTable {
    entries: HashMap<StateKey, Slot>,
    hits: u64,
    misses: u64,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for `key` if it was searched at least `depth` plies deep, scored
    /// for `depth` remaining plies. Counts a hit or miss.
    pub fn probe(&mut self, key: &StateKey, depth: u32) -> Option<TtEntry> {
        let found = self.entry(key, depth);
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    /// Same as [`TranspositionTable::probe`] without touching the counters.
    pub fn entry(&self, key: &StateKey, depth: u32) -> Option<TtEntry> {
        let slot = self.entries.get(key).filter(|slot| slot.depth >= depth)?;
        Some(TtEntry {
            score: from_outcome(slot.outcome, depth)?,
            best_move: slot.best_move,
            depth: slot.depth,
            bound: slot.bound,
        })
    }

    /// Stored move regardless of depth, for move ordering.
    pub fn best_move(&self, key: &StateKey) -> Option<Position> {
        self.entries.get(key).and_then(|slot| slot.best_move)
    }

    /// Store an entry scored at `entry.depth` remaining plies, keeping a deeper
    /// existing one unless the new score is exact.
    pub fn store(&mut self, key: StateKey, entry: TtEntry) {
        let deeper = self
            .entries
            .get(&key)
            .is_some_and(|existing| existing.depth > entry.depth);
        if deeper && entry.bound != Bound::Exact {
            return;
        }
        self.entries.insert(
            key,
            Slot {
                outcome: to_outcome(entry.score, entry.depth),
                best_move: entry.best_move,
                depth: entry.depth,
                bound: entry.bound,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: u32) -> StateKey {
        StateKey::from(n)
    }

    fn entry(score: i32, depth: u32, bound: Bound) -> TtEntry {
        TtEntry {
            score,
            best_move: Position::new(4).ok(),
            depth,
            bound,
        }
    }

    #[test]
    fn lookup_requires_sufficient_depth() {
        let mut tt = TranspositionTable::new();
        tt.store(key(1), entry(0, 4, Bound::Exact));

        assert_eq!(tt.probe(&key(1), 4).map(|e| e.score), Some(0));
        assert_eq!(tt.probe(&key(1), 2).map(|e| e.score), Some(0));
        assert!(tt.probe(&key(1), 5).is_none());
        assert!(tt.probe(&key(2), 0).is_none());
        assert_eq!(tt.hits(), 2);
        assert_eq!(tt.misses(), 2);
    }

    #[test]
    fn decided_score_follows_remaining_depth() {
        // Win two plies out, found with 7 plies left: 7 + 1 - 2
        let mut tt = TranspositionTable::new();
        tt.store(key(1), entry(6, 7, Bound::Exact));

        assert_eq!(tt.entry(&key(1), 7).map(|e| e.score), Some(6));
        assert_eq!(tt.entry(&key(1), 3).map(|e| e.score), Some(2));
        assert_eq!(tt.entry(&key(1), 2).map(|e| e.score), Some(1));
        assert_eq!(tt.entry(&key(1), 3).map(|e| e.depth), Some(7));

        // Loss one ply out
        tt.store(key(2), entry(-9, 9, Bound::Upper));
        assert_eq!(tt.entry(&key(2), 1).map(|e| e.score), Some(-1));
        assert_eq!(tt.entry(&key(2), 4).map(|e| e.score), Some(-4));
    }

    #[test]
    fn outcome_beyond_horizon_is_not_reported() {
        let mut tt = TranspositionTable::new();
        // Win four plies out, found with 9 plies left
        tt.store(key(1), entry(6, 9, Bound::Lower));

        assert!(tt.probe(&key(1), 3).is_none());
        assert_eq!(tt.probe(&key(1), 4).map(|e| e.score), Some(1));
        assert_eq!(tt.best_move(&key(1)), Position::new(4).ok());
        assert_eq!(tt.misses(), 1);
    }

    #[test]
    fn shallow_bound_does_not_replace_deep_entry() {
        let mut tt = TranspositionTable::new();
        tt.store(key(1), entry(5, 6, Bound::Lower));
        tt.store(key(1), entry(-1, 2, Bound::Upper));
        assert_eq!(tt.entry(&key(1), 6).map(|e| e.score), Some(5));

        tt.store(key(1), entry(2, 2, Bound::Exact));
        assert_eq!(tt.entry(&key(1), 2).map(|e| e.bound), Some(Bound::Exact));

        tt.store(key(1), entry(0, 3, Bound::Upper));
        assert_eq!(tt.entry(&key(1), 3).map(|e| e.bound), Some(Bound::Upper));
        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn move_is_available_for_ordering_at_any_depth() {
        let mut tt = TranspositionTable::new();
        tt.store(key(9), entry(0, 1, Bound::Exact));
        assert!(tt.probe(&key(9), 3).is_none());
        assert_eq!(tt.best_move(&key(9)), Position::new(4).ok());
    }
}
