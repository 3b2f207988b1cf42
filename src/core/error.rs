//! Error types for the engine.
//!
//! Rule violations (`InvalidMove`, `TimeExpired`) are expected during play:
//! the game engine converts them into `InvalidMove` events and never lets
//! them escape as panics. `OutOfBounds` and `MalformedImport` are caller
//! errors and fail loudly.

use thiserror::Error;

use super::player::Player;

/// Errors that can occur in engine operations.
#[derive(Error, Debug)]
pub enum GameError {
    /// Coordinate outside the 8x8 grid.
    #[error("coordinate ({col}, {row}) is outside the 8x8 board")]
    OutOfBounds { col: i32, row: i32 },

    /// Occupied cell or a placement that flips nothing.
    #[error("invalid move: {reason}")]
    InvalidMove { reason: &'static str },

    /// The mover's clock reached zero before the move.
    #[error("time expired for {player}")]
    TimeExpired { player: Player },

    /// A serialized game that does not parse or validate.
    #[error("malformed saved game: {0}")]
    MalformedImport(String),

    /// Undo with an empty undo stack.
    #[error("nothing to undo")]
    NothingToUndo,

    /// Redo with an empty redo stack.
    #[error("nothing to redo")]
    NothingToRedo,
}

impl GameError {
    /// The human-readable reason carried by `InvalidMove` events.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            GameError::InvalidMove { reason } => (*reason).to_string(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::MalformedImport(err.to_string())
    }
}

/// Result type alias for engine operations.
pub type GameResult<T> = Result<T, GameError>;
