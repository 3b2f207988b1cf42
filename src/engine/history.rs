//! Move records, undo/redo snapshots, and the persisted game document.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::clock::TimeControlState;
use crate::core::{Board, Coord, PerPlayer, Player, Score};

/// A recorded move. Immutable once appended to history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// The mover's color.
    pub player: Player,

    /// The coordinate played.
    pub coord: Coord,

    /// Milliseconds since the Unix epoch when the move was committed.
    pub timestamp_ms: u64,

    /// Score immediately after the move.
    pub score: Score,
}

impl Move {
    /// Create a new move record.
    #[must_use]
    pub fn new(player: Player, coord: Coord, timestamp_ms: u64, score: Score) -> Self {
        Self {
            player,
            coord,
            timestamp_ms,
            score,
        }
    }

    /// The move's coordinate in Othello notation (`"d3"`).
    #[must_use]
    pub fn notation(&self) -> String {
        self.coord.to_string()
    }
}

/// An undo/redo unit: an independently-owned deep copy of everything a
/// state-mutating operation can change. Snapshots never alias the live
/// board.
#[derive(Clone, Debug)]
pub(crate) struct Snapshot {
    pub board: Board,
    pub history: Vector<Move>,
    pub clock: Option<TimeControlState>,
}

/// The portable persisted form of a game: board, history, player names,
/// and (for timed games) the clock bookkeeping.
///
/// Serialized as JSON by `Game::export_state`. The `clock` field is
/// omitted for untimed games, and a document without one imports into an
/// untimed game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub board: Board,
    pub history: Vec<Move>,
    pub players: PerPlayer<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock: Option<TimeControlState>,
}
