//! Crate-wide error type

use thiserror::Error;

/// Everything the library can fail with
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("cell {position} is occupied")]
    InvalidMove { position: usize },

    #[error("cell {position} is off the board (cells are 0-8)")]
    InvalidPosition { position: usize },

    #[error("label '{context}' has {got} cells, expected {expected}")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("'{character}' at cell {position} of '{context}' is not a rank (use . 1-3 a-c)")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("rank {rank} appears more than once in '{context}'")]
    DuplicateRank { rank: i8, context: String },

    #[error("cannot infer the side to move from '{label}'; write it as '{expected}'")]
    InvalidLabelFormat { label: String, expected: String },

    #[error("side to move '{player}' in '{label}' must be X or O")]
    InvalidPlayerString { player: String, label: String },

    #[error("invalid state encoding {bytes:02x?}: {reason}")]
    InvalidEncoding { bytes: [u8; 4], reason: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("internal consistency error: {message}")]
    Consistency { message: String },

    #[error("value iteration did not converge within {passes} passes")]
    NoConvergence { passes: usize },

    #[error("score span {span} does not fit in a signed byte record")]
    ScoreOverflow { span: i32 },

    #[error("corrupt table: {message}")]
    CorruptTable { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("bad progress style: {message}")]
    ProgressBarTemplate { message: String },

    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "access a file".to_string(),
            source,
        }
    }
}

impl Error {
    /// Shorthand for a [`Error::Consistency`] with a formatted message.
    pub fn consistency(message: impl Into<String>) -> Self {
        Error::Consistency {
            message: message.into(),
        }
    }
}
