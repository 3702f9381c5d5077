//! Game-theoretic solvers
//!
//! - [`retrograde`]: exhaustive fixed-point value iteration over the whole
//!   reachable state space, producing a [`SolvedTable`]
//! - [`negamax`]: depth-limited online search for when no table is available

pub mod negamax;
pub mod retrograde;
pub mod solved;
pub mod transposition;

use serde::{Deserialize, Serialize};

pub use negamax::{MAX_SEARCH_DEPTH, NegamaxEngine, SearchConfig, SearchResult};
pub use retrograde::{RetrogradeSolver, SolveReport, SolverConfig, WIN_SCORE, toward_zero};
pub use solved::{SolvedEntry, SolvedTable};
pub use transposition::{Bound, TranspositionTable, TtEntry};

use crate::types::Position;

/// Where an [`Evaluation`] came from. Scores are only comparable within a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvaluationSource {
    SolvedTable,
    CompiledTable,
    Search,
}

/// Score and optimal moves for a queried state.
///
/// `score` is from X's perspective (positive means X wins). `best_moves` are in
/// the coordinates of the queried state, sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: i32,
    pub best_moves: Vec<Position>,
    pub source: EvaluationSource,
}

impl Evaluation {
    pub fn best_move(&self) -> Option<Position> {
        self.best_moves.first().copied()
    }
}
