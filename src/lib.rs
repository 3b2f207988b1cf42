//! # othello-engine
//!
//! Rules engine, game state machine, search opponent, and chess-clock
//! time control for 8x8 Othello/Reversi.
//!
//! ## Design Principles
//!
//! 1. **Rules are pure**: `Board` answers legality, flipping, scoring, and
//!    termination questions with no knowledge of clocks, history, or
//!    events.
//!
//! 2. **One mutable board**: the live board lives inside `Game` and is
//!    mutated only by its operations. Everything handed outward — views,
//!    undo/redo snapshots, search inputs — is an independently-owned copy.
//!
//! 3. **Expected failures are events**: rejected moves and flag falls
//!    surface as `InvalidMove`/`GameOver` events with human-readable
//!    reasons; only caller programming errors (bad coordinates, malformed
//!    imports) fail loudly.
//!
//! ## Architecture
//!
//! - **Synchronous core**: every operation runs to completion; time is
//!   sampled from a monotonic source at request time, never accrued by
//!   background timers.
//!
//! - **Bounded search**: the hard opponent is fixed-depth alpha-beta with
//!   an opening-book shortcut; no cancellation is needed because depth
//!   bounds worst-case latency.
//!
//! ## Modules
//!
//! - `core`: players, coordinates, the board rules engine, errors, RNG
//! - `clock`: per-player time control with Fischer increment
//! - `engine`: the stateful game orchestrator, events, history, persistence
//! - `ai`: difficulty tiers, evaluation, alpha-beta search, opening book

pub mod ai;
pub mod clock;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    AnnotatedCell, AnnotatedGrid, Board, Cell, Coord, GameError, GameResult, GameRng, Grid,
    PerPlayer, Player, Score,
};

pub use crate::clock::{
    ManualClock, MonotonicClock, TimeControl, TimeControlConfig, TimeControlState, TimeSource,
};

pub use crate::engine::{
    EventKind, Game, GameBuilder, GameEvent, GameStatus, GameView, ListenerId, Move, SavedGame,
    StateAction,
};

pub use crate::ai::{Difficulty, OpeningBook, Opponent, Strategy};
