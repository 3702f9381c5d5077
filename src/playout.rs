//! Self-play driven by a [`MoveOracle`]

use rand::{Rng, prelude::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::MoveOracle,
    solver::Evaluation,
    tictactoe::{BoardState, Player},
    types::Position,
};

/// Pick uniformly among the evaluation's best moves.
///
/// # Examples
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use tactictoe::{
///     playout::choose_move,
///     solver::{Evaluation, EvaluationSource},
///     types::Position,
/// };
///
/// let eval = Evaluation {
///     score: 0,
///     best_moves: vec![Position::new(2)?, Position::new(6)?],
///     source: EvaluationSource::SolvedTable,
/// };
/// let mut rng = StdRng::seed_from_u64(42);
/// assert!(eval.best_moves.contains(&choose_move(&mut rng, &eval).unwrap()));
/// # Ok::<(), tactictoe::Error>(())
/// ```
pub fn choose_move<R: Rng>(rng: &mut R, eval: &Evaluation) -> Option<Position> {
    eval.best_moves.choose(rng).copied()
}

/// A finished (or truncated) game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playout {
    pub start: BoardState,
    pub moves: Vec<Position>,
    pub end: BoardState,
    pub winner: Option<Player>,
}

impl Playout {
    pub fn plies(&self) -> usize {
        self.moves.len()
    }
}

/// Let `oracle` play both sides from `start` for at most `max_plies` plies.
///
/// # Errors
///
/// [`Error::Consistency`] if the oracle has no answer for a non-terminal state.
pub fn play_out<R: Rng>(
    oracle: &mut dyn MoveOracle,
    start: BoardState,
    max_plies: usize,
    rng: &mut R,
) -> Result<Playout> {
    let mut state = start;
    let mut moves = Vec::new();

    while !state.is_terminal() && moves.len() < max_plies {
        let eval = oracle.evaluate(&state)?.ok_or_else(|| {
            Error::consistency(format!("{} has no answer for {}", oracle.name(), state.label()))
        })?;
        let mv = choose_move(rng, &eval).ok_or_else(|| {
            Error::consistency(format!("empty best-move set for {}", state.label()))
        })?;
        state = state.apply(mv)?;
        moves.push(mv);
    }

    Ok(Playout {
        start,
        moves,
        end: state,
        winner: state.winner(),
    })
}
