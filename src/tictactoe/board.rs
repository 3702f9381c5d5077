//! Board state representation and the three-mark transition rule

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;
use crate::types::Position;

/// Magnitude of a freshly placed mark. A mark aged to 0 vanishes.
pub const MAX_RANK: i8 = 3;

/// A player in the game. X moves first and owns the positive ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Sign of this player's ranks on the board
    pub fn sign(self) -> i8 {
        match self {
            Player::X => 1,
            Player::O => -1,
        }
    }

    /// Whether a cell value belongs to this player
    pub fn owns(self, cell: i8) -> bool {
        cell * self.sign() > 0
    }

    pub fn to_char(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Label character for a cell value: `.` empty, `1`-`3` for X, `a`-`c` for O.
pub fn rank_to_char(cell: i8) -> char {
    match cell {
        1..=3 => (b'0' + cell as u8) as char,
        -3..=-1 => (b'a' + (-cell - 1) as u8) as char,
        _ => '.',
    }
}

/// Inverse of [`rank_to_char`].
pub fn rank_from_char(c: char) -> Option<i8> {
    match c {
        '.' | ' ' => Some(0),
        '1'..='3' => Some((c as u8 - b'0') as i8),
        'a'..='c' => Some(-((c as u8 - b'a') as i8 + 1)),
        _ => None,
    }
}

/// Complete board state: nine signed ranks and the side to move.
///
/// Transitions never mutate a state in place; [`BoardState::apply`] returns a
/// new value and the type is `Copy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    pub cells: [i8; 9],
    pub to_move: Player,
}

impl BoardState {
    /// Empty board with X to move
    pub fn new() -> Self {
        BoardState {
            cells: [0; 9],
            to_move: Player::X,
        }
    }

    /// Parse 9 rank characters into cells.
    fn parse_cells(chars: &[char], context: &str) -> Result<[i8; 9], crate::Error> {
        if chars.len() != 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: context.to_string(),
            });
        }

        let mut cells = [0i8; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = rank_from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: context.to_string(),
            })?;
        }

        Self::check_unique_ranks(&cells, context)?;
        Ok(cells)
    }

    fn check_unique_ranks(cells: &[i8; 9], context: &str) -> Result<(), crate::Error> {
        let mut seen = [false; 7];
        for &cell in cells {
            if cell == 0 {
                continue;
            }
            let slot = (cell + MAX_RANK) as usize;
            if seen[slot] {
                return Err(crate::Error::DuplicateRank {
                    rank: cell,
                    context: context.to_string(),
                });
            }
            seen[slot] = true;
        }
        Ok(())
    }

    fn parse_player(player_str: &str, context: &str) -> Result<Player, crate::Error> {
        match player_str {
            "X" | "x" => Ok(Player::X),
            "O" | "o" => Ok(Player::O),
            _ => Err(crate::Error::InvalidPlayerString {
                player: player_str.to_string(),
                label: context.to_string(),
            }),
        }
    }

    /// Create a board from a label such as `"3.b.2a1.c_O"`.
    ///
    /// Whitespace is ignored. The `_X`/`_O` suffix is optional; without it the
    /// side to move is inferred from mark counts (X when counts are equal, O when
    /// X has one more).
    ///
    /// # Errors
    ///
    /// Returns error if the board part is not exactly 9 cells, a character is not a
    /// rank, a rank is duplicated, both sides hold a line, or the turn cannot be
    /// inferred.
    pub fn from_label(label: &str) -> Result<Self, crate::Error> {
        let cleaned: String = label.chars().filter(|c| !c.is_whitespace()).collect();
        let (board_part, turn) = match cleaned.split_once('_') {
            Some((board, suffix)) => (board, Some(Self::parse_player(suffix, label)?)),
            None => (cleaned.as_str(), None),
        };

        let chars: Vec<char> = board_part.chars().collect();
        let cells = Self::parse_cells(&chars, label)?;

        let to_move = match turn {
            Some(player) => player,
            None => {
                let x = cells.iter().filter(|&&c| c > 0).count();
                let o = cells.iter().filter(|&&c| c < 0).count();
                if x == o {
                    Player::X
                } else if x == o + 1 {
                    Player::O
                } else {
                    return Err(crate::Error::InvalidLabelFormat {
                        label: label.to_string(),
                        expected: "XXXXXXXXX_P".to_string(),
                    });
                }
            }
        };

        let board = BoardState { cells, to_move };
        if board.has_won(Player::X) && board.has_won(Player::O) {
            return Err(crate::Error::InvalidConfiguration {
                message: format!("invalid board label '{label}': both players hold a line"),
            });
        }

        Ok(board)
    }

    /// Label form accepted by [`BoardState::from_label`].
    pub fn label(&self) -> String {
        format!(
            "{}_{}",
            self.cells.iter().map(|&c| rank_to_char(c)).collect::<String>(),
            self.to_move.to_char()
        )
    }

    /// Check the at-most-once rank invariant and the rank range.
    pub fn is_valid(&self) -> bool {
        self.cells.iter().all(|c| (-MAX_RANK..=MAX_RANK).contains(c))
            && Self::check_unique_ranks(&self.cells, "").is_ok()
    }

    pub fn get(&self, pos: Position) -> i8 {
        self.cells[pos.index()]
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.cells[pos.index()] == 0
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Number of marks currently held by a player.
    pub fn marks(&self, player: Player) -> usize {
        self.cells.iter().filter(|&&c| player.owns(c)).count()
    }

    pub fn empty_positions(&self) -> Vec<Position> {
        Position::all().filter(|&pos| self.is_empty(pos)).collect()
    }

    /// Legal moves: every empty cell, or none once the game is decided.
    pub fn legal_moves(&self) -> Vec<Position> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.empty_positions()
    }

    /// Place the mover's mark, aging the mover's older marks first.
    ///
    /// The target must be empty before aging, so a mark about to vanish still
    /// blocks its own cell.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidMove`] if the target cell is occupied.
    #[must_use = "apply returns a new board state; the original is unchanged"]
    pub fn apply(&self, pos: Position) -> Result<BoardState, crate::Error> {
        if !self.is_empty(pos) {
            return Err(crate::Error::InvalidMove {
                position: pos.index(),
            });
        }

        let sign = self.to_move.sign();
        let mut next = *self;
        for cell in &mut next.cells {
            if *cell * sign > 0 {
                *cell -= sign;
            }
        }
        next.cells[pos.index()] = sign * MAX_RANK;
        next.to_move = self.to_move.opponent();
        Ok(next)
    }

    /// [`BoardState::apply`] addressed by (row, column).
    #[must_use = "apply_row_col returns a new board state; the original is unchanged"]
    pub fn apply_row_col(&self, row: usize, col: usize) -> Result<BoardState, crate::Error> {
        self.apply(Position::from_row_col(row, col)?)
    }

    pub fn has_won(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, player)
    }

    pub fn winner(&self) -> Option<Player> {
        if self.has_won(Player::X) {
            Some(Player::X)
        } else if self.has_won(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Only a completed line ends the game; a full board does not.
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some()
    }

    /// Moves that complete a line for the side to move this turn.
    pub fn winning_moves(&self) -> Vec<Position> {
        LineAnalyzer::winning_moves(&self.cells, self.to_move)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let cell = self.cells[row * 3 + col];
                let glyph = match cell.signum() {
                    1 => format!("X{cell}"),
                    -1 => format!("O{}", -cell),
                    _ => " .".to_string(),
                };
                write!(f, "{glyph}")?;
                if col < 2 {
                    write!(f, " ")?;
                }
            }
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
