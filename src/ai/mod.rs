//! The search-based computer opponent.
//!
//! Three difficulty tiers: uniformly random, greedy one-ply, and
//! book-guided minimax with alpha-beta pruning. The opponent is invoked by
//! the caller with a board snapshot (and the move history, which the
//! opening book keys on) and returns a coordinate to feed back into the
//! game engine; it never mutates engine state itself.

pub mod book;
pub mod eval;
pub mod search;
pub mod strategy;

pub use book::OpeningBook;
pub use eval::{evaluate, POSITION_WEIGHTS};
pub use search::{best_move, DEFAULT_DEPTH};
pub use strategy::{GreedyStrategy, MinimaxStrategy, RandomStrategy, Strategy};

use crate::core::{Board, Coord};
use crate::engine::Move;

/// Opponent difficulty tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Difficulty {
    /// Uniformly random among legal moves.
    Easy,
    /// Greedy immediate disc-count maximization.
    Medium,
    /// Depth-limited minimax with alpha-beta pruning and an opening book.
    Hard,
}

/// A computer opponent for one side.
pub struct Opponent {
    difficulty: Difficulty,
    strategy: Box<dyn Strategy>,
}

impl Opponent {
    /// Create an opponent at the given tier.
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        let strategy: Box<dyn Strategy> = match difficulty {
            Difficulty::Easy => Box::new(RandomStrategy::new()),
            Difficulty::Medium => Box::new(GreedyStrategy),
            Difficulty::Hard => Box::new(MinimaxStrategy::new()),
        };

        Self {
            difficulty,
            strategy,
        }
    }

    /// Seeded variant; only the random tier consumes the seed.
    #[must_use]
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        let strategy: Box<dyn Strategy> = match difficulty {
            Difficulty::Easy => Box::new(RandomStrategy::with_seed(seed)),
            Difficulty::Medium => Box::new(GreedyStrategy),
            Difficulty::Hard => Box::new(MinimaxStrategy::new()),
        };

        Self {
            difficulty,
            strategy,
        }
    }

    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Compute a move for the snapshot's current mover, or `None` when
    /// that side must pass.
    pub fn calculate_move(&mut self, board: &Board, history: &[Move]) -> Option<Coord> {
        self.strategy.choose(board, history)
    }
}
