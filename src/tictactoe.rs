//! Three-mark tic-tac-toe: rules, encoding, symmetry and state enumeration

pub mod board;
pub mod encoding;
pub mod lines;
pub mod state_space;
pub mod symmetry;

pub use board::{BoardState, MAX_RANK, Player};
pub use encoding::{CanonicalContext, StateKey, decode, encode};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use state_space::{Edge, StateSpace, StateSpaceStats};
pub use symmetry::D4Transform;
