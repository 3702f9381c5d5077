//! Compiled move table: the deployable artifact of a solve
//!
//! - [`compressor`]: prunes and merges the solved table into records
//! - [`record`]: the 6-byte record layout

pub mod compressor;
pub mod record;

pub use compressor::{Compression, CompressionStats, Compressor, CompressorConfig};
pub use record::{CompiledRecord, NO_MOVE, NO_SCORE, RECORD_SIZE};

use crate::{
    Error, Result,
    solver::{Evaluation, EvaluationSource},
    tictactoe::BoardState,
};

/// Records sorted by board bytes, searchable by canonical board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledTable {
    records: Vec<CompiledRecord>,
}

impl CompiledTable {
    /// Build a table, sorting the records by board.
    ///
    /// # Errors
    ///
    /// [`Error::Consistency`] if two records share a board.
    pub fn new(mut records: Vec<CompiledRecord>) -> Result<Self> {
        records.sort_unstable();
        if let Some(pair) = records.windows(2).find(|w| w[0].board == w[1].board) {
            return Err(Error::consistency(format!(
                "duplicate record for board {}",
                pair[0]
            )));
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[CompiledRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn lookup_record(&self, board: [u8; 3]) -> Option<&CompiledRecord> {
        self.records
            .binary_search_by(|record| record.board.cmp(&board))
            .ok()
            .map(|idx| &self.records[idx])
    }

    /// Score and best move for any state, or `None` when the table has no entry.
    pub fn lookup(&self, state: &BoardState) -> Option<Evaluation> {
        let ctx = state.canonical_context();
        let record = self.lookup_record(ctx.key.board_bytes())?;
        let best_move = record.best_move(state.to_move)?;
        let score = record.score(state.to_move)?;

        Some(Evaluation {
            score: score as i32,
            best_moves: vec![ctx.map_canonical_to_original(best_move)],
            source: EvaluationSource::CompiledTable,
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.records.iter().flat_map(|r| r.to_bytes()).collect()
    }

    /// Parse a record file.
    ///
    /// # Errors
    ///
    /// [`Error::CorruptTable`] on a truncated file, an invalid record, or records
    /// that are not strictly ascending.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % RECORD_SIZE != 0 {
            return Err(Error::CorruptTable {
                message: format!(
                    "length {} is not a multiple of {RECORD_SIZE}",
                    bytes.len()
                ),
            });
        }

        let mut records = Vec::with_capacity(bytes.len() / RECORD_SIZE);
        for chunk in bytes.chunks_exact(RECORD_SIZE) {
            let mut raw = [0u8; RECORD_SIZE];
            raw.copy_from_slice(chunk);
            let record = CompiledRecord::from_bytes(raw)?;
            if records
                .last()
                .is_some_and(|prev: &CompiledRecord| prev.board >= record.board)
            {
                return Err(Error::CorruptTable {
                    message: format!("record {record} is out of order"),
                });
            }
            records.push(record);
        }

        Ok(Self { records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        tictactoe::{D4Transform, Player},
        types::Position,
    };

    fn record(board: [u8; 3], x: Option<(usize, i8)>, o: Option<(usize, i8)>) -> CompiledRecord {
        let mut record = CompiledRecord::empty(board);
        if let Some((mv, score)) = x {
            record.set(Player::X, Position::new(mv).unwrap(), score);
        }
        if let Some((mv, score)) = o {
            record.set(Player::O, Position::new(mv).unwrap(), score);
        }
        record
    }

    #[test]
    fn new_sorts_and_rejects_duplicates() {
        let a = record([0x10, 0, 0], Some((1, 2)), None);
        let b = record([0x01, 0, 0], None, Some((3, -1)));
        let table = CompiledTable::new(vec![a, b]).unwrap();
        assert_eq!(table.records(), &[b, a]);

        assert!(CompiledTable::new(vec![a, a]).is_err());
    }

    #[test]
    fn bytes_round_trip_and_validation() {
        let table = CompiledTable::new(vec![
            record([0x01, 0, 0], None, Some((3, -1))),
            record([0x10, 0, 0], Some((1, 2)), Some((0, 0))),
        ])
        .unwrap();
        let bytes = table.to_bytes();
        assert_eq!(bytes.len(), 12);
        assert_eq!(CompiledTable::from_bytes(&bytes).unwrap(), table);

        assert!(matches!(
            CompiledTable::from_bytes(&bytes[..7]),
            Err(Error::CorruptTable { .. })
        ));

        let mut swapped = bytes[6..].to_vec();
        swapped.extend_from_slice(&bytes[..6]);
        assert!(matches!(
            CompiledTable::from_bytes(&swapped),
            Err(Error::CorruptTable { .. })
        ));
    }

    #[test]
    fn lookup_maps_move_into_caller_coordinates() {
        let state = BoardState::from_label("2..a3.b.._X").unwrap();
        let ctx = state.canonical_context();
        let canonical_move = ctx.map_move_to_canonical(Position::new(5).unwrap());
        let table = CompiledTable::new(vec![{
            let mut r = CompiledRecord::empty(ctx.key.board_bytes());
            r.set(Player::X, canonical_move, 4);
            r
        }])
        .unwrap();

        for t in D4Transform::ALL {
            let image = state.transform(&t);
            let eval = table.lookup(&image).unwrap();
            assert_eq!(eval.score, 4);
            assert_eq!(
                eval.best_moves,
                vec![t.transform_position(Position::new(5).unwrap())]
            );
        }

        let o_turn = BoardState {
            to_move: Player::O,
            ..state
        };
        assert!(table.lookup(&o_turn).is_none());
    }
}
