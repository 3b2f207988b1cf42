//! The stateful game engine.
//!
//! `Game` owns the live board and move history, delegates legality and
//! flipping to the rules engine, drives the per-player clock, maintains
//! undo/redo snapshot stacks, and publishes events to subscribers.
//!
//! ## State machine
//!
//! `InProgress -> InProgress` on a successful move; `InProgress -> Over`
//! when the board reaches a terminal position or the mover's clock runs
//! out; `Over` is terminal except for [`Game::reset`].
//!
//! ## Snapshot discipline
//!
//! Every state-mutating operation snapshots first. Snapshots are deep
//! copies with no aliasing into the live board; a new move clears the redo
//! stack; a rejected move discards the snapshot it pushed.

pub mod events;
pub mod history;

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use im::Vector;
use log::{debug, info, warn};

use crate::clock::{MonotonicClock, TimeControl, TimeControlConfig, TimeSource};
use crate::core::{AnnotatedGrid, Board, Coord, GameError, GameResult, PerPlayer, Player, Score};

pub use events::{EventBus, EventKind, GameEvent, ListenerId, StateAction};
pub use history::{Move, SavedGame};

use history::Snapshot;

/// Engine lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    /// Terminal. `winner` is `None` on a tie; on timeout it is the
    /// opponent of the side that overran its clock.
    Over { winner: Option<Player> },
}

/// A read-only composite view of the game, derived on request.
///
/// The board inside is a clone; mutating it cannot affect the engine.
/// `winner` carries the definitive result once `game_over` is true
/// (including timeout awards); before that it is the current disc leader.
#[derive(Clone, Debug, PartialEq)]
pub struct GameView {
    pub board: Board,
    pub score: Score,
    pub valid_moves: Vec<Coord>,
    pub game_over: bool,
    pub winner: Option<Player>,
    pub history: Vec<Move>,
    pub current_player: Player,
    pub players: PerPlayer<Option<String>>,
}

/// Builder for [`Game`]: optional player names, time control, and time
/// source. Absence of time control makes every clock operation a no-op.
pub struct GameBuilder {
    players: PerPlayer<Option<String>>,
    time_control: Option<TimeControlConfig>,
    source: Option<Arc<dyn TimeSource>>,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            players: PerPlayer::new(None, None),
            time_control: None,
            source: None,
        }
    }
}

impl GameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the black player.
    #[must_use]
    pub fn black_player(mut self, name: impl Into<String>) -> Self {
        self.players.black = Some(name.into());
        self
    }

    /// Name the white player.
    #[must_use]
    pub fn white_player(mut self, name: impl Into<String>) -> Self {
        self.players.white = Some(name.into());
        self
    }

    /// Enable time control with the given configuration.
    #[must_use]
    pub fn time_control(mut self, config: TimeControlConfig) -> Self {
        self.time_control = Some(config);
        self
    }

    /// Inject a time source (tests use `ManualClock`).
    #[must_use]
    pub fn time_source(mut self, source: Arc<dyn TimeSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Build the game. With time control configured, black's clock starts
    /// immediately.
    #[must_use]
    pub fn build(self) -> Game {
        let source: Arc<dyn TimeSource> = self
            .source
            .unwrap_or_else(|| Arc::new(MonotonicClock::new()));

        let time = self.time_control.map(|config| {
            let mut tc = TimeControl::new(config, Arc::clone(&source));
            tc.start_clock(Player::Black);
            tc
        });

        Game {
            board: Board::new(),
            history: Vector::new(),
            players: self.players,
            time_config: self.time_control,
            time,
            source,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            events: EventBus::new(),
            status: GameStatus::InProgress,
        }
    }
}

/// The stateful game orchestrator.
pub struct Game {
    board: Board,
    history: Vector<Move>,
    players: PerPlayer<Option<String>>,
    /// Original configuration, kept so `reset` can rebuild the clock.
    time_config: Option<TimeControlConfig>,
    time: Option<TimeControl>,
    source: Arc<dyn TimeSource>,
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    events: EventBus,
    status: GameStatus,
}

impl Game {
    /// Start building a game.
    #[must_use]
    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    /// A fresh untimed game with anonymous players.
    #[must_use]
    pub fn new() -> Self {
        GameBuilder::new().build()
    }

    // === Queries ===

    /// Engine lifecycle state.
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    /// An independently-owned copy of the live board, safe to hand to
    /// search.
    #[must_use]
    pub fn board_snapshot(&self) -> Board {
        self.board.clone()
    }

    /// The move history as an owned list.
    #[must_use]
    pub fn history(&self) -> Vec<Move> {
        self.history.iter().cloned().collect()
    }

    /// Legal coordinates for the current mover.
    #[must_use]
    pub fn valid_moves(&self) -> Vec<Coord> {
        self.board.valid_moves()
    }

    /// Display grid with legal cells marked.
    #[must_use]
    pub fn annotated_board(&self) -> AnnotatedGrid {
        self.board.annotated()
    }

    /// Remaining clock time per side; `None` when untimed.
    #[must_use]
    pub fn time_remaining(&self) -> Option<PerPlayer<i64>> {
        self.time.as_ref().map(TimeControl::remaining)
    }

    /// The full derived view. Two calls without an intervening mutation
    /// return equal views.
    #[must_use]
    pub fn state(&self) -> GameView {
        let winner = match self.status {
            GameStatus::Over { winner } => winner,
            GameStatus::InProgress => self.board.winner(),
        };

        GameView {
            board: self.board.clone(),
            score: self.board.score(),
            valid_moves: self.board.valid_moves(),
            game_over: matches!(self.status, GameStatus::Over { .. }),
            winner,
            history: self.history(),
            current_player: self.board.turn(),
            players: self.players.clone(),
        }
    }

    // === Event subscription ===

    /// Register a listener; fires synchronously, in registration order.
    pub fn on(
        &mut self,
        kind: EventKind,
        listener: impl FnMut(&GameEvent) + 'static,
    ) -> ListenerId {
        self.events.on(kind, listener)
    }

    /// Remove a listener registered with [`Game::on`].
    pub fn off(&mut self, kind: EventKind, id: ListenerId) -> bool {
        self.events.off(kind, id)
    }

    // === Mutations ===

    /// Attempt a move for the current mover.
    ///
    /// Rule violations and timeouts do not mutate the board: they surface
    /// as an `InvalidMove` event (plus `GameOver` on timeout) and an `Err`.
    pub fn make_move(&mut self, coord: Coord) -> GameResult<()> {
        if matches!(self.status, GameStatus::Over { .. }) {
            self.emit(GameEvent::InvalidMove {
                coord,
                reason: "game is over".to_string(),
            });
            return Err(GameError::InvalidMove {
                reason: "game is over",
            });
        }

        let mover = self.board.turn();

        // Flag fall: the mover lost on time before this move arrived.
        let timed_out = self.time.as_ref().is_some_and(|tc| tc.is_timeout(mover));
        if timed_out {
            let winner = Some(mover.opponent());
            self.status = GameStatus::Over { winner };
            if let Some(tc) = &mut self.time {
                // Freeze without crediting an increment for a move that
                // never happened.
                tc.pause();
            }

            warn!("{mover} flagged before playing {coord}");
            self.emit(GameEvent::InvalidMove {
                coord,
                reason: "time expired".to_string(),
            });
            let state = self.state();
            self.emit(GameEvent::GameOver { winner, state });

            return Err(GameError::TimeExpired { player: mover });
        }

        let snapshot = self.snapshot();
        self.undo_stack.push(snapshot);

        if let Err(err) = self.board.take_turn(coord) {
            self.undo_stack.pop();
            debug!("{mover} rejected at {coord}: {err}");
            self.emit(GameEvent::InvalidMove {
                coord,
                reason: err.reason(),
            });
            return Err(err);
        }

        self.redo_stack.clear();

        let game_over = self.board.is_game_over();
        if let Some(tc) = &mut self.time {
            tc.stop_clock();
            if !game_over {
                tc.start_clock(self.board.turn());
            }
        }

        let record = Move::new(mover, coord, unix_now_ms(), self.board.score());
        self.history.push_back(record.clone());
        debug!("{mover} played {coord}; score {}", record.score);

        let state = self.state();
        self.emit(GameEvent::Move {
            record,
            state: state.clone(),
        });
        self.emit(GameEvent::StateChange {
            action: StateAction::Move,
            state,
        });

        if game_over {
            let winner = self.board.winner();
            self.status = GameStatus::Over { winner };
            match winner {
                Some(player) => info!("game over: {player} wins {}", self.board.score()),
                None => info!("game over: tie {}", self.board.score()),
            }
            let state = self.state();
            self.emit(GameEvent::GameOver { winner, state });
        }

        Ok(())
    }

    /// Rewind to the state before the most recent move.
    pub fn undo(&mut self) -> GameResult<()> {
        let snapshot = match self.undo_stack.pop() {
            Some(s) => s,
            None => return Err(GameError::NothingToUndo),
        };

        self.pause_time();
        let current = self.snapshot();
        self.redo_stack.push(current);
        self.restore(snapshot);
        self.resume_time();

        debug!("undo to {} recorded moves", self.history.len());
        let state = self.state();
        self.emit(GameEvent::StateChange {
            action: StateAction::Undo,
            state,
        });

        Ok(())
    }

    /// Replay a move previously rewound with [`Game::undo`].
    pub fn redo(&mut self) -> GameResult<()> {
        let snapshot = match self.redo_stack.pop() {
            Some(s) => s,
            None => return Err(GameError::NothingToRedo),
        };

        self.pause_time();
        let current = self.snapshot();
        self.undo_stack.push(current);
        self.restore(snapshot);
        self.resume_time();

        debug!("redo to {} recorded moves", self.history.len());
        let state = self.state();
        self.emit(GameEvent::StateChange {
            action: StateAction::Redo,
            state,
        });

        Ok(())
    }

    /// Reinitialize to the standard starting position, clearing history
    /// and both snapshot stacks. A configured clock is rebuilt from the
    /// original configuration with black's clock running.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.history = Vector::new();
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.status = GameStatus::InProgress;

        self.time = self.time_config.map(|config| {
            let mut tc = TimeControl::new(config, Arc::clone(&self.source));
            tc.start_clock(Player::Black);
            tc
        });

        info!("game reset");
        let state = self.state();
        self.emit(GameEvent::StateChange {
            action: StateAction::Reset,
            state,
        });
    }

    /// Freeze the clock (no-op when untimed).
    pub fn pause_time(&mut self) {
        if let Some(tc) = &mut self.time {
            tc.pause();
        }
    }

    /// Resume a paused clock (no-op when untimed).
    pub fn resume_time(&mut self) {
        if let Some(tc) = &mut self.time {
            tc.resume();
        }
    }

    // === Persistence ===

    /// Serialize the complete game (board, history, player names, and
    /// clock bookkeeping when timed) to portable JSON.
    pub fn export_state(&self) -> GameResult<String> {
        let saved = SavedGame {
            board: self.board.clone(),
            history: self.history(),
            players: self.players.clone(),
            clock: self.time.as_ref().map(TimeControl::export_state),
        };

        Ok(serde_json::to_string_pretty(&saved)?)
    }

    /// Restore a game exported with [`Game::export_state`].
    ///
    /// The document is parsed and validated in full before any live state
    /// changes; a malformed import leaves the current game untouched.
    pub fn import_state(&mut self, text: &str) -> GameResult<()> {
        let saved: SavedGame = serde_json::from_str(text)?;

        self.board = saved.board;
        self.history = saved.history.into_iter().collect();
        self.players = saved.players;
        self.time = saved
            .clock
            .map(|state| TimeControl::restore(state, Arc::clone(&self.source)));
        self.time_config = self.time.as_ref().map(TimeControl::config);
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.recompute_status();

        info!("imported game with {} recorded moves", self.history.len());
        let state = self.state();
        self.emit(GameEvent::StateChange {
            action: StateAction::Import,
            state,
        });

        Ok(())
    }

    // === Internals ===

    fn emit(&mut self, event: GameEvent) {
        self.events.emit(&event);
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            history: self.history.clone(),
            clock: self.time.as_ref().map(TimeControl::export_state),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.board = snapshot.board;
        self.history = snapshot.history;
        if let (Some(tc), Some(state)) = (self.time.as_mut(), snapshot.clock) {
            tc.import_state(state);
        }
        self.recompute_status();
    }

    fn recompute_status(&mut self) {
        self.status = if self.board.is_game_over() {
            GameStatus::Over {
                winner: self.board.winner(),
            }
        } else {
            GameStatus::InProgress
        };
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

fn unix_now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
