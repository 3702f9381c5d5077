//! Fixed-point (retrograde) value iteration.
//!
//! Marks vanish, so the same configuration can recur and the state graph has
//! cycles. Values are therefore computed by repeated relaxation: every pass
//! recomputes each non-terminal state from the previous pass's values until a
//! pass changes nothing. States that can dodge both outcomes forever stay at 0.

use std::collections::BTreeMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::solved::{SolvedEntry, SolvedTable};
use crate::{
    Error, Result,
    ports::SolveObserver,
    tictactoe::{Player, StateSpace},
    types::Position,
};

/// Internal magnitude of a terminal win before normalization
pub const WIN_SCORE: i32 = 1000;

/// Largest normalized magnitude; 0x7F is reserved as the record sentinel.
const MAX_NORMALIZED: i32 = i8::MAX as i32 - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Upper bound on relaxation passes before giving up
    pub max_passes: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { max_passes: 512 }
    }
}

impl SolverConfig {
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }
}

/// Summary of a finished solve
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveReport {
    /// Passes run, including the final pass that changed nothing
    pub passes: usize,
    pub changes_per_pass: Vec<usize>,
    /// Normalized magnitude of a terminal state
    pub win_score: i8,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
}

/// Move a nonzero value one step toward 0: one ply further from the outcome.
pub fn toward_zero(value: i32) -> i32 {
    value - value.signum()
}

fn extreme(player: Player, values: impl Iterator<Item = i32>) -> Option<i32> {
    match player {
        Player::X => values.max(),
        Player::O => values.min(),
    }
}

/// Value-iteration solver over a frozen [`StateSpace`]
pub struct RetrogradeSolver<'a> {
    space: &'a StateSpace,
    config: SolverConfig,
}

impl<'a> RetrogradeSolver<'a> {
    pub fn new(space: &'a StateSpace, config: SolverConfig) -> Self {
        Self { space, config }
    }

    /// Terminal states at ±[`WIN_SCORE`], everything else at 0.
    pub fn initial_values(&self) -> Vec<i32> {
        (0..self.space.len())
            .map(|idx| match self.space.state(idx).winner() {
                Some(Player::X) => WIN_SCORE,
                Some(Player::O) => -WIN_SCORE,
                None => 0,
            })
            .collect()
    }

    /// One Jacobi pass: every state reads only `values`, never this pass's output.
    ///
    /// Returns the new values and the number of states that changed.
    pub fn relax(&self, values: &[i32]) -> Result<(Vec<i32>, usize)> {
        let mut next = values.to_vec();
        let mut changes = 0;

        for (idx, slot) in next.iter_mut().enumerate() {
            if self.space.is_terminal(idx) {
                continue;
            }
            let mover = self.space.state(idx).to_move;
            let best = extreme(
                mover,
                self.space.edges(idx).iter().map(|edge| values[edge.child]),
            )
            .ok_or_else(|| {
                Error::consistency(format!(
                    "non-terminal state {} has no moves",
                    self.space.key(idx)
                ))
            })?;

            let value = toward_zero(best);
            if value != *slot {
                *slot = value;
                changes += 1;
            }
        }

        Ok((next, changes))
    }

    /// Iterate [`RetrogradeSolver::relax`] to a fixed point.
    ///
    /// # Errors
    ///
    /// [`Error::NoConvergence`] if `max_passes` passes all changed something.
    pub fn fixed_point(
        &self,
        observer: &mut dyn SolveObserver,
    ) -> Result<(Vec<i32>, Vec<usize>)> {
        let mut values = self.initial_values();
        let mut history = Vec::new();

        loop {
            if history.len() >= self.config.max_passes {
                return Err(Error::NoConvergence {
                    passes: history.len(),
                });
            }

            let (next, changes) = self.relax(&values)?;
            values = next;
            history.push(changes);
            debug!("pass {}: {} values changed", history.len(), changes);
            observer.on_pass(history.len(), changes)?;

            if changes == 0 {
                return Ok((values, history));
            }
        }
    }

    /// Solve the space: fixed point, normalization, then optimal move sets.
    pub fn solve(&self, observer: &mut dyn SolveObserver) -> Result<(SolvedTable, SolveReport)> {
        let (values, history) = self.fixed_point(observer)?;
        let (scores, win_score) = normalize(&values)?;

        let mut entries = BTreeMap::new();
        for idx in 0..self.space.len() {
            let key = self.space.key(idx);
            let terminal = self.space.is_terminal(idx);
            let children: Vec<(Position, _)> = self
                .space
                .edges(idx)
                .iter()
                .map(|edge| (edge.position, self.space.key(edge.child)))
                .collect();

            let best_moves = if terminal {
                Vec::new()
            } else {
                let moves = self.best_moves(idx, &scores);
                if moves.is_empty() {
                    return Err(Error::consistency(format!(
                        "non-terminal state {key} has an empty best-move set"
                    )));
                }
                moves
            };

            entries.insert(
                key,
                SolvedEntry {
                    score: scores[idx],
                    best_moves,
                    terminal,
                    children,
                },
            );
        }

        let root = self.space.key(0);
        let table = SolvedTable::new(entries, root, win_score, history.len());
        let report = SolveReport {
            passes: history.len(),
            changes_per_pass: history,
            win_score,
            x_wins: scores.iter().filter(|&&s| s > 0).count(),
            o_wins: scores.iter().filter(|&&s| s < 0).count(),
            draws: scores.iter().filter(|&&s| s == 0).count(),
        };
        info!(
            "solved {} states in {} passes (root score {}, terminal magnitude {})",
            table.len(),
            report.passes,
            scores.first().copied().unwrap_or_default(),
            win_score
        );
        observer.on_solved(&report)?;

        Ok((table, report))
    }

    /// Moves whose child attains the mover's extreme normalized value.
    fn best_moves(&self, idx: usize, scores: &[i8]) -> Vec<Position> {
        let edges = self.space.edges(idx);
        let mover = self.space.state(idx).to_move;
        let Some(target) = extreme(mover, edges.iter().map(|e| scores[e.child] as i32)) else {
            return Vec::new();
        };

        let mut moves: Vec<Position> = edges
            .iter()
            .filter(|edge| scores[edge.child] as i32 == target)
            .map(|edge| edge.position)
            .collect();
        moves.sort_unstable();
        moves
    }
}

/// Compress decided values so the slowest outcome lands at ±1.
///
/// With `D` the longest distance-to-outcome present, a value at distance `d`
/// becomes `±(D + 1 - d)`; terminal states become `±(D + 1)`.
///
/// # Errors
///
/// [`Error::ScoreOverflow`] if `D + 1` does not fit below the record sentinel.
pub fn normalize(values: &[i32]) -> Result<(Vec<i8>, i8)> {
    let max_distance = values
        .iter()
        .filter(|&&v| v != 0)
        .map(|&v| WIN_SCORE - v.abs())
        .max()
        .unwrap_or(0);
    let span = max_distance + 1;
    if span > MAX_NORMALIZED {
        return Err(Error::ScoreOverflow { span });
    }

    let scores = values
        .iter()
        .map(|&v| {
            if v == 0 {
                0
            } else {
                let distance = WIN_SCORE - v.abs();
                (v.signum() * (span - distance)) as i8
            }
        })
        .collect();

    Ok((scores, span as i8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ports::NullObserver, tictactoe::BoardState};

    fn pos(i: usize) -> Position {
        Position::new(i).unwrap()
    }

    fn play(moves: &[usize]) -> BoardState {
        moves
            .iter()
            .fold(BoardState::new(), |s, &m| s.apply(pos(m)).unwrap())
    }

    #[test]
    fn toward_zero_shrinks_magnitude() {
        assert_eq!(toward_zero(WIN_SCORE), WIN_SCORE - 1);
        assert_eq!(toward_zero(-WIN_SCORE), -WIN_SCORE + 1);
        assert_eq!(toward_zero(0), 0);
        assert_eq!(toward_zero(1), 0);
    }

    #[test]
    fn normalize_maps_slowest_outcome_to_one() {
        let values = [WIN_SCORE, WIN_SCORE - 3, 0, -(WIN_SCORE - 1), -WIN_SCORE];
        let (scores, win) = normalize(&values).unwrap();
        assert_eq!(win, 4);
        assert_eq!(scores, vec![4, 1, 0, -3, -4]);
    }

    #[test]
    fn normalize_rejects_oversized_span() {
        let values = [WIN_SCORE, WIN_SCORE - 200];
        assert!(matches!(
            normalize(&values),
            Err(Error::ScoreOverflow { .. })
        ));
    }

    #[test]
    fn two_state_cycle_converges_to_draw() {
        // A and B only lead to each other, as if every move vanished and replayed
        let a = play(&[0, 4, 8, 2]);
        let b = a.apply(pos(1)).unwrap();
        let space =
            StateSpace::from_nodes(vec![(a, vec![(pos(1), 1)]), (b, vec![(pos(0), 0)])])
                .unwrap();

        let solver = RetrogradeSolver::new(&space, SolverConfig::default());
        let (values, history) = solver.fixed_point(&mut NullObserver).unwrap();
        assert_eq!(values, vec![0, 0]);
        assert_eq!(history, vec![0]);

        let (table, _) = solver.solve(&mut NullObserver).unwrap();
        assert_eq!(table.score(&a.encode()), Some(0));
        assert_eq!(table.best_moves(&a.encode()), Some(&[pos(1)][..]));
    }

    #[test]
    fn cycle_with_exit_prefers_the_win() {
        // X at A can loop through B or step into an X win
        let a = play(&[0, 3, 1, 4]);
        let b = a.apply(pos(8)).unwrap();
        let win = a.apply(pos(2)).unwrap();
        assert_eq!(win.winner(), Some(Player::X));

        let space = StateSpace::from_nodes(vec![
            (a, vec![(pos(8), 1), (pos(2), 2)]),
            (b, vec![(pos(6), 0)]),
            (win, vec![]),
        ])
        .unwrap();
        let solver = RetrogradeSolver::new(&space, SolverConfig::default());
        let (values, _) = solver.fixed_point(&mut NullObserver).unwrap();
        assert_eq!(values[0], WIN_SCORE - 1);
        // B's only move returns to A, so B is a loss for O two plies out
        assert_eq!(values[1], WIN_SCORE - 2);

        let (table, _) = solver.solve(&mut NullObserver).unwrap();
        assert_eq!(table.best_moves(&a.encode()), Some(&[pos(2)][..]));
    }

    #[test]
    fn pass_limit_is_enforced() {
        let a = play(&[0, 3, 1, 4]);
        let b = a.apply(pos(8)).unwrap();
        let win = a.apply(pos(2)).unwrap();
        let space = StateSpace::from_nodes(vec![
            (a, vec![(pos(8), 1), (pos(2), 2)]),
            (b, vec![(pos(6), 0)]),
            (win, vec![]),
        ])
        .unwrap();
        let solver = RetrogradeSolver::new(&space, SolverConfig::default().with_max_passes(1));
        assert!(matches!(
            solver.fixed_point(&mut NullObserver),
            Err(Error::NoConvergence { passes: 1 })
        ));
    }
}
