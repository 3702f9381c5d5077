//! Oracle port: "what is the best move here?"
//!
//! A host picks how positions are answered (precomputed table, full solved
//! table, live search) by choosing an implementation, and can chain them with
//! a fallback.

use crate::{Result, solver::Evaluation, tictactoe::BoardState};

/// Port for evaluating positions.
///
/// `Ok(None)` means the oracle has no answer for the state (for example a
/// pruned table entry), so a caller may ask another oracle. Errors are reserved
/// for genuine failures.
pub trait MoveOracle {
    fn evaluate(&mut self, state: &BoardState) -> Result<Option<Evaluation>>;

    fn name(&self) -> &'static str;
}

impl<T: MoveOracle + ?Sized> MoveOracle for Box<T> {
    fn evaluate(&mut self, state: &BoardState) -> Result<Option<Evaluation>> {
        (**self).evaluate(state)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
