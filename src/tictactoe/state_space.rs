//! Reachable canonical state space, enumerated breadth-first

use std::collections::{HashMap, VecDeque};

use log::info;

use super::{
    Player,
    board::BoardState,
    encoding::StateKey,
};
use crate::{Result, types::Position};

/// A move from a canonical state, in that state's coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub position: Position,
    /// Arena index of the canonical child
    pub child: usize,
}

/// Arena of canonical states with their outgoing moves.
///
/// States are addressed by stable indices; index 0 is the root. The arena is
/// frozen once enumeration finishes.
#[derive(Debug, Clone, Default)]
pub struct StateSpace {
    states: Vec<BoardState>,
    keys: Vec<StateKey>,
    depths: Vec<u32>,
    edges: Vec<Vec<Edge>>,
    index: HashMap<StateKey, usize>,
}

/// Summary counts for a [`StateSpace`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateSpaceStats {
    pub states: usize,
    pub terminal: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub x_to_move: usize,
    pub o_to_move: usize,
    pub edges: usize,
    pub max_depth: u32,
}

impl StateSpace {
    /// Enumerate every canonical state reachable from the empty board.
    pub fn enumerate() -> Result<Self> {
        Self::enumerate_from(BoardState::new())
    }

    /// Enumerate every canonical state reachable from `root`.
    ///
    /// # Errors
    ///
    /// Fails only if the rules engine rejects one of its own legal moves.
    pub fn enumerate_from(root: BoardState) -> Result<Self> {
        let mut space = StateSpace::default();
        let root = root.canonical_context();
        space.insert(root.state, root.key, 0);

        let mut frontier = VecDeque::new();
        frontier.push_back((0usize, 0u32));

        while let Some((idx, depth)) = frontier.pop_front() {
            let state = space.states[idx];
            if state.is_terminal() {
                continue;
            }

            let mut edges = Vec::new();
            for position in state.legal_moves() {
                let child = state.apply(position)?.canonical_context();
                let child_idx = match space.index.get(&child.key) {
                    Some(&existing) => existing,
                    None => {
                        let inserted = space.insert(child.state, child.key, depth + 1);
                        frontier.push_back((inserted, depth + 1));
                        inserted
                    }
                };
                edges.push(Edge {
                    position,
                    child: child_idx,
                });
            }
            space.edges[idx] = edges;
        }

        let stats = space.stats();
        info!(
            "enumerated {} canonical states ({} terminal, max depth {})",
            stats.states, stats.terminal, stats.max_depth
        );
        Ok(space)
    }

    /// Build a space from explicit nodes and edges, for synthetic graphs.
    ///
    /// Each node is a state and its `(move, child index)` list. Keys are taken
    /// from the states as given, so they should already be canonical.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Consistency`] if an edge points outside the node
    /// list or two nodes share a key.
    pub fn from_nodes(nodes: Vec<(BoardState, Vec<(Position, usize)>)>) -> Result<Self> {
        let mut space = StateSpace::default();
        let count = nodes.len();
        for (idx, (state, moves)) in nodes.into_iter().enumerate() {
            let key = state.encode();
            if space.index.contains_key(&key) {
                return Err(crate::Error::consistency(format!(
                    "duplicate state {key} in synthetic graph"
                )));
            }
            space.insert(state, key, 0);
            let mut edges = Vec::with_capacity(moves.len());
            for (position, child) in moves {
                if child >= count {
                    return Err(crate::Error::consistency(format!(
                        "edge from node {idx} points at missing node {child}"
                    )));
                }
                edges.push(Edge { position, child });
            }
            space.edges[idx] = edges;
        }
        Ok(space)
    }

    fn insert(&mut self, state: BoardState, key: StateKey, depth: u32) -> usize {
        let idx = self.states.len();
        self.states.push(state);
        self.keys.push(key);
        self.depths.push(depth);
        self.edges.push(Vec::new());
        self.index.insert(key, idx);
        idx
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, idx: usize) -> &BoardState {
        &self.states[idx]
    }

    pub fn key(&self, idx: usize) -> StateKey {
        self.keys[idx]
    }

    /// BFS depth at which the state was first discovered
    pub fn depth(&self, idx: usize) -> u32 {
        self.depths[idx]
    }

    pub fn edges(&self, idx: usize) -> &[Edge] {
        &self.edges[idx]
    }

    pub fn is_terminal(&self, idx: usize) -> bool {
        self.states[idx].is_terminal()
    }

    pub fn index_of(&self, key: &StateKey) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn contains(&self, key: &StateKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn keys(&self) -> &[StateKey] {
        &self.keys
    }

    pub fn stats(&self) -> StateSpaceStats {
        let mut stats = StateSpaceStats {
            states: self.len(),
            ..StateSpaceStats::default()
        };

        for (idx, state) in self.states.iter().enumerate() {
            match state.winner() {
                Some(Player::X) => stats.x_wins += 1,
                Some(Player::O) => stats.o_wins += 1,
                None => {}
            }
            match state.to_move {
                Player::X => stats.x_to_move += 1,
                Player::O => stats.o_to_move += 1,
            }
            stats.edges += self.edges[idx].len();
            stats.max_depth = stats.max_depth.max(self.depths[idx]);
        }
        stats.terminal = stats.x_wins + stats.o_wins;
        stats
    }
}
