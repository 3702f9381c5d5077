//! Fixed-width record of the compiled table

use std::fmt;

use crate::{Error, Result, tictactoe::Player, types::Position};

/// Bytes per record on disk
pub const RECORD_SIZE: usize = 6;

/// Move nibble for a turn that has no retained state
pub const NO_MOVE: u8 = 0xF;

/// Score byte for a turn that has no retained state
pub const NO_SCORE: i8 = 0x7F;

/// One board with both turn perspectives merged.
///
/// Layout: `[board0, board1, board2, moves, score_x, score_o]` where `moves`
/// holds X's best move in the high nibble and O's in the low nibble. Both scores
/// are positive when X wins, whichever side is to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompiledRecord {
    pub board: [u8; 3],
    pub moves: u8,
    pub score_x: i8,
    pub score_o: i8,
}

impl CompiledRecord {
    /// Record for `board` with neither turn present yet
    pub fn empty(board: [u8; 3]) -> Self {
        Self {
            board,
            moves: (NO_MOVE << 4) | NO_MOVE,
            score_x: NO_SCORE,
            score_o: NO_SCORE,
        }
    }

    /// Fill in one turn's move and score.
    pub fn set(&mut self, player: Player, best_move: Position, score: i8) {
        let nibble = best_move.index() as u8;
        match player {
            Player::X => {
                self.moves = (nibble << 4) | (self.moves & 0x0F);
                self.score_x = score;
            }
            Player::O => {
                self.moves = (self.moves & 0xF0) | nibble;
                self.score_o = score;
            }
        }
    }

    pub fn has(&self, player: Player) -> bool {
        self.move_nibble(player) != NO_MOVE
    }

    fn move_nibble(&self, player: Player) -> u8 {
        match player {
            Player::X => self.moves >> 4,
            Player::O => self.moves & 0x0F,
        }
    }

    /// Best move for `player` in canonical coordinates
    pub fn best_move(&self, player: Player) -> Option<Position> {
        Position::try_from(self.move_nibble(player)).ok()
    }

    pub fn score(&self, player: Player) -> Option<i8> {
        let score = match player {
            Player::X => self.score_x,
            Player::O => self.score_o,
        };
        (score != NO_SCORE).then_some(score)
    }

    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        [
            self.board[0],
            self.board[1],
            self.board[2],
            self.moves,
            self.score_x as u8,
            self.score_o as u8,
        ]
    }

    /// Parse and validate one record.
    ///
    /// # Errors
    ///
    /// [`Error::CorruptTable`] if a move nibble is out of range, a turn has a move
    /// without a score (or the reverse), or neither turn is present.
    pub fn from_bytes(bytes: [u8; RECORD_SIZE]) -> Result<Self> {
        let record = Self {
            board: [bytes[0], bytes[1], bytes[2]],
            moves: bytes[3],
            score_x: bytes[4] as i8,
            score_o: bytes[5] as i8,
        };

        for player in [Player::X, Player::O] {
            let nibble = record.move_nibble(player);
            if nibble > 8 && nibble != NO_MOVE {
                return Err(record.corrupt(format!("move nibble {nibble:#x} for {player}")));
            }
            if (nibble == NO_MOVE) != record.score(player).is_none() {
                return Err(record.corrupt(format!("move and score disagree for {player}")));
            }
        }
        if !record.has(Player::X) && !record.has(Player::O) {
            return Err(record.corrupt("record holds neither turn".to_string()));
        }

        Ok(record)
    }

    fn corrupt(&self, reason: String) -> Error {
        Error::CorruptTable {
            message: format!(
                "record {:02x}{:02x}{:02x}: {reason}",
                self.board[0], self.board[1], self.board[2]
            ),
        }
    }
}

impl fmt::Display for CompiledRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}{:02x}{:02x}",
            self.board[0], self.board[1], self.board[2]
        )?;
        for player in [Player::X, Player::O] {
            match (self.best_move(player), self.score(player)) {
                (Some(mv), Some(score)) => write!(f, " {player}:{}@{score:+}", mv.index())?,
                _ => write!(f, " {player}:-")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_has_sentinels() {
        let record = CompiledRecord::empty([0x84, 0xF0, 0xFF]);
        assert_eq!(record.to_bytes(), [0x84, 0xF0, 0xFF, 0xFF, 0x7F, 0x7F]);
        assert_eq!(record.best_move(Player::X), None);
        assert_eq!(record.score(Player::O), None);
    }

    #[test]
    fn set_fills_the_right_nibble() {
        let mut record = CompiledRecord::empty([0x84, 0xF0, 0xFF]);
        record.set(Player::O, Position::new(6).unwrap(), -2);
        assert_eq!(record.moves, 0xF6);
        record.set(Player::X, Position::new(1).unwrap(), 3);
        assert_eq!(record.moves, 0x16);
        assert_eq!(record.to_bytes(), [0x84, 0xF0, 0xFF, 0x16, 3, 0xFE]);
        assert_eq!(CompiledRecord::from_bytes(record.to_bytes()).unwrap(), record);
    }

    #[test]
    fn rejects_corrupt_records() {
        // move nibble 9
        assert!(CompiledRecord::from_bytes([0, 0, 0, 0x9F, 1, 0x7F]).is_err());
        // move present, score missing
        assert!(CompiledRecord::from_bytes([0, 0, 0, 0x1F, 0x7F, 0x7F]).is_err());
        // neither turn
        assert!(CompiledRecord::from_bytes([0, 0, 0, 0xFF, 0x7F, 0x7F]).is_err());
    }

    #[test]
    fn display_shows_both_turns() {
        let mut record = CompiledRecord::empty([0x84, 0xF0, 0xFF]);
        record.set(Player::X, Position::new(1).unwrap(), 3);
        assert_eq!(record.to_string(), "84f0ff X:1@+3 O:-");
    }
}
