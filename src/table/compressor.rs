//! Solved table → compiled table
//!
//! Terminal states carry no move and are dropped. Decided states that are close
//! to their outcome are cheap for the online engine and are pruned. The two turn
//! perspectives of a board share one record.

use std::collections::BTreeMap;

use log::info;
use serde::{Deserialize, Serialize};

use super::{CompiledRecord, CompiledTable};
use crate::{
    Error, Result,
    solver::SolvedTable,
    tictactoe::{Player, StateKey, StateSpace},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressorConfig {
    /// Decided states at most this many plies from their outcome are dropped
    pub prune_distance: u32,
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self { prune_distance: 1 }
    }
}

impl CompressorConfig {
    pub fn with_prune_distance(mut self, prune_distance: u32) -> Self {
        self.prune_distance = prune_distance;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionStats {
    /// States considered
    pub total: usize,
    pub terminal_dropped: usize,
    pub pruned: usize,
    pub retained: usize,
    /// Records holding both turns
    pub merged_pairs: usize,
    pub records: usize,
}

/// Output of [`Compressor::compress`]
#[derive(Debug, Clone)]
pub struct Compression {
    pub table: CompiledTable,
    /// Canonical keys that made it into the table, sorted
    pub retained: Vec<StateKey>,
    pub stats: CompressionStats,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Compressor {
    config: CompressorConfig,
}

impl Compressor {
    pub fn new(config: CompressorConfig) -> Self {
        Self { config }
    }

    /// Compress every state of `space` using its solved entry.
    ///
    /// # Errors
    ///
    /// [`Error::Consistency`] if a state has no solved entry or a retained state
    /// has no best move. Nothing is produced in that case.
    pub fn compress(&self, space: &StateSpace, solved: &SolvedTable) -> Result<Compression> {
        let mut stats = CompressionStats {
            total: space.len(),
            ..CompressionStats::default()
        };
        let mut merged: BTreeMap<[u8; 3], CompiledRecord> = BTreeMap::new();
        let mut retained = Vec::new();

        for &key in space.keys() {
            let entry = solved
                .get(&key)
                .ok_or_else(|| Error::consistency(format!("state {key} has no solved entry")))?;

            if entry.terminal {
                stats.terminal_dropped += 1;
                continue;
            }
            if solved
                .distance_to_outcome(entry.score)
                .is_some_and(|distance| distance <= self.config.prune_distance)
            {
                stats.pruned += 1;
                continue;
            }

            let best_move = *entry.best_moves.iter().min().ok_or_else(|| {
                Error::consistency(format!("retained state {key} has no best move"))
            })?;
            let player = if key.turn_byte() == 0 {
                Player::X
            } else {
                Player::O
            };

            let record = merged
                .entry(key.board_bytes())
                .or_insert_with(|| CompiledRecord::empty(key.board_bytes()));
            if record.has(player) {
                return Err(Error::consistency(format!(
                    "state {key} was merged twice"
                )));
            }
            record.set(player, best_move, entry.score);
            retained.push(key);
        }

        retained.sort_unstable();
        stats.retained = retained.len();
        stats.merged_pairs = merged
            .values()
            .filter(|r| r.has(Player::X) && r.has(Player::O))
            .count();
        stats.records = merged.len();

        let table = CompiledTable::new(merged.into_values().collect())?;
        info!(
            "compressed {} states into {} records ({} terminal, {} pruned, {} merged pairs)",
            stats.total, stats.records, stats.terminal_dropped, stats.pruned, stats.merged_pairs
        );

        Ok(Compression {
            table,
            retained,
            stats,
        })
    }
}
