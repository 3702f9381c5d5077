//! Shared fixtures for the integration tests.
//!
//! Solving the full game takes a moment, so each test binary solves it once.

#![allow(dead_code)]

use std::sync::OnceLock;

use rand::{Rng, rngs::StdRng};
use tactictoe::{
    BoardState, Position,
    app::PipelineConfig,
    pipeline::{Pipeline, Solution},
    tictactoe::StateSpace,
};

struct Solved {
    space: StateSpace,
    solution: Solution,
}

fn solved() -> &'static Solved {
    static SOLVED: OnceLock<Solved> = OnceLock::new();
    SOLVED.get_or_init(|| {
        let space = StateSpace::enumerate().expect("enumeration failed");
        let solution = Pipeline::new(PipelineConfig::default())
            .solve_space(&space)
            .expect("solve failed");
        Solved { space, solution }
    })
}

/// Every reachable canonical state
pub fn space() -> &'static StateSpace {
    &solved().space
}

/// Full solve with default settings
pub fn solution() -> &'static Solution {
    &solved().solution
}

pub fn pos(index: usize) -> Position {
    Position::new(index).expect("index in range")
}

/// Play `moves` from the empty board
pub fn play(moves: &[usize]) -> BoardState {
    moves.iter().fold(BoardState::new(), |state, &mv| {
        state.apply(pos(mv)).expect("legal move")
    })
}

/// A uniformly random legal game of up to `plies` plies
pub fn random_walk(rng: &mut StdRng, plies: usize) -> BoardState {
    let mut state = BoardState::new();
    for _ in 0..plies {
        let moves = state.legal_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.random_range(0..moves.len())];
        state = state.apply(mv).expect("legal move");
    }
    state
}
