//! Move-selection strategies behind the difficulty tiers.
//!
//! Every strategy is a pure function of a board snapshot (plus the move
//! history, which only the book-backed strategy reads). Exploration goes
//! through `Board::with_move`; the live board is never mutated.

use crate::core::{Board, Coord, GameRng};
use crate::engine::Move;

use super::book::OpeningBook;
use super::search;

/// A move-selection policy for one side.
pub trait Strategy {
    /// Pick a move for the board's current mover, or `None` to signal
    /// "must pass".
    fn choose(&mut self, board: &Board, history: &[Move]) -> Option<Coord>;
}

/// Uniformly random selection among legal moves.
pub struct RandomStrategy {
    rng: GameRng,
}

impl RandomStrategy {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: GameRng::from_entropy(),
        }
    }

    /// Seeded variant for reproducible games.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomStrategy {
    fn choose(&mut self, board: &Board, _history: &[Move]) -> Option<Coord> {
        let moves = board.valid_moves();
        self.rng.choose(&moves).copied()
    }
}

/// Greedy one-ply search: maximize the immediate disc-count delta.
///
/// Deterministic: candidates are scanned in row-major order and ties keep
/// the first maximum.
pub struct GreedyStrategy;

impl Strategy for GreedyStrategy {
    fn choose(&mut self, board: &Board, _history: &[Move]) -> Option<Coord> {
        let mover = board.turn();
        let before = i32::from(board.score().for_player(mover));

        let mut best: Option<(Coord, i32)> = None;
        for coord in board.valid_moves() {
            let Some(child) = board.with_move(coord) else {
                continue;
            };
            let delta = i32::from(child.score().for_player(mover)) - before;

            if best.map_or(true, |(_, best_delta)| delta > best_delta) {
                best = Some((coord, delta));
            }
        }

        best.map(|(coord, _)| coord)
    }
}

/// Book-guided minimax with alpha-beta pruning.
pub struct MinimaxStrategy {
    depth: u8,
    book: OpeningBook,
}

impl MinimaxStrategy {
    /// Standard book, default depth.
    #[must_use]
    pub fn new() -> Self {
        Self::with_depth(search::DEFAULT_DEPTH)
    }

    #[must_use]
    pub fn with_depth(depth: u8) -> Self {
        Self {
            depth,
            book: OpeningBook::standard(),
        }
    }

    /// Replace the opening book (tests use `OpeningBook::empty`).
    #[must_use]
    pub fn with_book(mut self, book: OpeningBook) -> Self {
        self.book = book;
        self
    }
}

impl Default for MinimaxStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for MinimaxStrategy {
    fn choose(&mut self, board: &Board, history: &[Move]) -> Option<Coord> {
        // A book hit must still be legal on this board; a caller may probe
        // with a history that does not describe the position.
        if let Some(reply) = self.book.probe(history) {
            if board.is_valid_move(reply) {
                return Some(reply);
            }
        }

        search::best_move(board, self.depth)
    }
}
