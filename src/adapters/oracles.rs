//! [`MoveOracle`] implementations.

use log::debug;

use crate::{
    Result,
    ports::MoveOracle,
    solver::{Evaluation, EvaluationSource, NegamaxEngine, SolvedTable},
    table::CompiledTable,
    tictactoe::BoardState,
};

/// Answers from a compiled record table; pruned and terminal states miss.
#[derive(Debug, Clone)]
pub struct TableOracle {
    table: CompiledTable,
}

impl TableOracle {
    pub fn new(table: CompiledTable) -> Self {
        Self { table }
    }
}

impl MoveOracle for TableOracle {
    fn evaluate(&mut self, state: &BoardState) -> Result<Option<Evaluation>> {
        Ok(self.table.lookup(state))
    }

    fn name(&self) -> &'static str {
        "compiled table"
    }
}

/// Answers from the full solved table with every optimal move.
#[derive(Debug, Clone)]
pub struct SolvedOracle {
    table: SolvedTable,
}

impl SolvedOracle {
    pub fn new(table: SolvedTable) -> Self {
        Self { table }
    }
}

impl MoveOracle for SolvedOracle {
    fn evaluate(&mut self, state: &BoardState) -> Result<Option<Evaluation>> {
        Ok(self.table.lookup(state).filter(|eval| !eval.best_moves.is_empty()))
    }

    fn name(&self) -> &'static str {
        "solved table"
    }
}

/// Answers by live negamax search at the engine's configured depth.
#[derive(Debug, Clone)]
pub struct SearchOracle {
    engine: NegamaxEngine,
}

impl SearchOracle {
    pub fn new(engine: NegamaxEngine) -> Self {
        Self { engine }
    }
}

impl MoveOracle for SearchOracle {
    /// Misses only at terminal states or depth 0. The score is converted to
    /// X's perspective.
    fn evaluate(&mut self, state: &BoardState) -> Result<Option<Evaluation>> {
        let result = self.engine.best_move(state)?;
        debug!(
            "searched {} nodes at depth {}",
            result.nodes,
            self.engine.config().max_depth
        );

        Ok(result.best_move.map(|mv| Evaluation {
            score: result.score * state.to_move.sign() as i32,
            best_moves: vec![mv],
            source: EvaluationSource::Search,
        }))
    }

    fn name(&self) -> &'static str {
        "negamax search"
    }
}

/// Consults `primary` and asks `fallback` when it has no answer.
#[derive(Debug, Clone)]
pub struct FallbackOracle<P, F> {
    primary: P,
    fallback: F,
}

impl<P: MoveOracle, F: MoveOracle> FallbackOracle<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: MoveOracle, F: MoveOracle> MoveOracle for FallbackOracle<P, F> {
    fn evaluate(&mut self, state: &BoardState) -> Result<Option<Evaluation>> {
        if let Some(eval) = self.primary.evaluate(state)? {
            return Ok(Some(eval));
        }
        debug!(
            "{} has no entry for {}, asking {}",
            self.primary.name(),
            state.label(),
            self.fallback.name()
        );
        self.fallback.evaluate(state)
    }

    fn name(&self) -> &'static str {
        "fallback"
    }
}
