//! Exact solver for three-mark tic-tac-toe
//!
//! Each side keeps at most three marks on the board; placing a fourth removes
//! that side's oldest mark. Positions can therefore recur and the game graph
//! has cycles.
//!
//! This crate provides:
//! - The rules engine with a compact 4-byte state encoding and D4 symmetry
//!   reduction
//! - Breadth-first enumeration of every reachable canonical state
//! - A fixed-point value solver producing scores and optimal move sets
//! - A compressor into a sorted table of 6-byte records
//! - Depth-limited negamax search for positions without a table entry

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod playout;
pub mod ports;
pub mod solver;
pub mod table;
pub mod tictactoe;
pub mod types;

pub use error::{Error, Result};
pub use solver::{Evaluation, EvaluationSource};
pub use tictactoe::{BoardState, Player, StateKey};
pub use types::Position;
