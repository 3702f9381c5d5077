//! Depth-limited negamax with alpha-beta pruning and a transposition table.
//!
//! Used when no precomputed table is available. Each node is searched in its
//! canonical orientation so symmetric positions share table entries; the root
//! result is mapped back into the caller's coordinates.
//!
//! Scores are from the perspective of the side to move. A terminal position is
//! a loss for the mover worth `-(depth_remaining + 1)`, so faster wins score
//! higher. A position already on the current search path scores 0; results
//! that depended on such a repetition are not stored, since they only hold for
//! the path they were reached by.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::transposition::{Bound, TranspositionTable, TtEntry};
use crate::{
    Error, Result,
    tictactoe::{BoardState, StateKey},
    types::Position,
};

const INF: i32 = 1_000_000;

/// Deepest search accepted by [`NegamaxEngine::search`]
pub const MAX_SEARCH_DEPTH: u32 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Depth used by [`NegamaxEngine::best_move`]
    pub max_depth: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_depth: 15 }
    }
}

impl SearchConfig {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Score for the side to move
    pub score: i32,
    /// Best move in the caller's coordinates; `None` at terminal states or depth 0
    pub best_move: Option<Position>,
    /// Nodes visited by this search
    pub nodes: u64,
}

/// Online search engine. Owns its transposition table across searches.
#[derive(Debug, Clone, Default)]
pub struct NegamaxEngine {
    config: SearchConfig,
    table: TranspositionTable,
    path: HashSet<StateKey>,
    nodes: u64,
    repetitions: u64,
}

impl NegamaxEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn table(&self) -> &TranspositionTable {
        &self.table
    }

    /// Search with the configured maximum depth.
    pub fn best_move(&mut self, state: &BoardState) -> Result<SearchResult> {
        self.search(state, self.config.max_depth)
    }

    /// Search `state` to `depth` plies.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] if `depth` exceeds [`MAX_SEARCH_DEPTH`].
    pub fn search(&mut self, state: &BoardState, depth: u32) -> Result<SearchResult> {
        if depth > MAX_SEARCH_DEPTH {
            return Err(Error::InvalidConfiguration {
                message: format!("search depth {depth} exceeds {MAX_SEARCH_DEPTH}"),
            });
        }
        self.nodes = 0;
        self.path.clear();

        let ctx = state.canonical_context();
        let (score, best_move) = self.negamax(&ctx.state, ctx.key, depth, -INF, INF)?;

        Ok(SearchResult {
            score,
            best_move: best_move.map(|mv| ctx.map_canonical_to_original(mv)),
            nodes: self.nodes,
        })
    }

    /// Negamax over a canonical state. The returned move is in its coordinates.
    fn negamax(
        &mut self,
        state: &BoardState,
        key: StateKey,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<(i32, Option<Position>)> {
        self.nodes += 1;

        if state.is_terminal() {
            return Ok((-(depth as i32 + 1), None));
        }
        if depth == 0 {
            return Ok((0, None));
        }
        if self.path.contains(&key) {
            self.repetitions += 1;
            return Ok((0, None));
        }

        let alpha_orig = alpha;
        if let Some(entry) = self.table.probe(&key, depth) {
            match entry.bound {
                Bound::Exact => return Ok((entry.score, entry.best_move)),
                Bound::Lower => alpha = alpha.max(entry.score),
                Bound::Upper => beta = beta.min(entry.score),
            }
            if alpha >= beta {
                return Ok((entry.score, entry.best_move));
            }
        }

        let repetitions = self.repetitions;
        self.path.insert(key);
        let outcome = self.search_moves(state, &key, depth, alpha, beta);
        self.path.remove(&key);
        let (best_score, best_move) = outcome?;
        if self.repetitions != repetitions {
            return Ok((best_score, best_move));
        }

        let bound = if best_score <= alpha_orig {
            Bound::Upper
        } else if best_score >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.table.store(
            key,
            TtEntry {
                score: best_score,
                best_move,
                depth,
                bound,
            },
        );

        Ok((best_score, best_move))
    }

    fn search_moves(
        &mut self,
        state: &BoardState,
        key: &StateKey,
        depth: u32,
        mut alpha: i32,
        beta: i32,
    ) -> Result<(i32, Option<Position>)> {
        let mut best_score = -INF;
        let mut best_move = None;

        for mv in self.ordered_moves(state, key) {
            let ctx = state.apply(mv)?.canonical_context();
            let (child_score, _) = self.negamax(&ctx.state, ctx.key, depth - 1, -beta, -alpha)?;
            let score = -child_score;

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        Ok((best_score, best_move))
    }

    /// Table move first, then immediate wins, then the rest in index order.
    fn ordered_moves(&self, state: &BoardState, key: &StateKey) -> Vec<Position> {
        let mut moves = Vec::with_capacity(9);
        if let Some(mv) = self.table.best_move(key) {
            moves.push(mv);
        }
        for mv in state.winning_moves() {
            if !moves.contains(&mv) {
                moves.push(mv);
            }
        }
        for mv in state.legal_moves() {
            if !moves.contains(&mv) {
                moves.push(mv);
            }
        }
        moves
    }
}
