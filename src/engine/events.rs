//! Event publication: an explicit observer registry.
//!
//! The game engine publishes every observable transition through an
//! [`EventBus`]: a mapping from event kind to an ordered list of listener
//! callbacks. Emission is synchronous and delivers to the listeners
//! registered for that kind, in registration order, so tests can observe
//! side effects deterministically.

use rustc_hash::FxHashMap;

use crate::core::{Coord, Player};

use super::history::Move;
use super::GameView;

/// The action that triggered a `StateChange` event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateAction {
    Move,
    Undo,
    Redo,
    Reset,
    Import,
}

/// An event published by the game engine.
#[derive(Debug)]
pub enum GameEvent {
    /// A move was committed.
    Move { record: Move, state: GameView },

    /// A move attempt was rejected; the board is unchanged.
    InvalidMove { coord: Coord, reason: String },

    /// The game ended. `winner` is `None` on a tie. Also fired on timeout,
    /// distinguishable by the loser's remaining time being zero or less.
    GameOver {
        winner: Option<Player>,
        state: GameView,
    },

    /// Fired after every mutation, tagged with the action that caused it.
    StateChange {
        action: StateAction,
        state: GameView,
    },
}

impl GameEvent {
    /// The kind used for listener dispatch.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::Move { .. } => EventKind::Move,
            GameEvent::InvalidMove { .. } => EventKind::InvalidMove,
            GameEvent::GameOver { .. } => EventKind::GameOver,
            GameEvent::StateChange { .. } => EventKind::StateChange,
        }
    }
}

/// The named event channels listeners subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Move,
    InvalidMove,
    GameOver,
    StateChange,
}

/// Handle returned by `on`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenerId(u32);

type Listener = Box<dyn FnMut(&GameEvent)>;

/// Ordered per-kind listener registry with synchronous dispatch.
#[derive(Default)]
pub struct EventBus {
    listeners: FxHashMap<EventKind, Vec<(ListenerId, Listener)>>,
    next_id: u32,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: FxHashMap<EventKind, usize> = self
            .listeners
            .iter()
            .map(|(kind, list)| (*kind, list.len()))
            .collect();
        f.debug_struct("EventBus")
            .field("listeners", &counts)
            .finish()
    }
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for one event kind. Listeners fire in
    /// registration order.
    pub fn on(&mut self, kind: EventKind, listener: impl FnMut(&GameEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;

        self.listeners
            .entry(kind)
            .or_default()
            .push((id, Box::new(listener)));

        id
    }

    /// Remove a previously-registered listener. Returns false if the
    /// handle is unknown for that kind.
    pub fn off(&mut self, kind: EventKind, id: ListenerId) -> bool {
        let Some(list) = self.listeners.get_mut(&kind) else {
            return false;
        };

        let before = list.len();
        list.retain(|(entry_id, _)| *entry_id != id);
        list.len() < before
    }

    /// Deliver an event to every listener of its kind, synchronously and
    /// in registration order.
    pub fn emit(&mut self, event: &GameEvent) {
        if let Some(list) = self.listeners.get_mut(&event.kind()) {
            for (_, listener) in list.iter_mut() {
                listener(event);
            }
        }
    }
}
