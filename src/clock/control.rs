//! Per-player chess-clock time control with Fischer increment.
//!
//! Remaining time is computed, never cached: while a side's clock runs,
//! `time_remaining` is stored-remaining minus elapsed-since-start measured
//! from the injected [`TimeSource`]. Stopping a clock folds the elapsed
//! interval into storage and applies the increment to the side that just
//! moved.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::{PerPlayer, Player};

use super::time_source::{MonotonicClock, TimeSource};

/// Time-control configuration: initial bank and per-move increment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeControlConfig {
    /// Starting time per player, milliseconds.
    pub initial_ms: u64,
    /// Fischer increment applied after each completed move, milliseconds.
    pub increment_ms: u64,
}

impl TimeControlConfig {
    #[must_use]
    pub const fn new(initial_ms: u64, increment_ms: u64) -> Self {
        Self {
            initial_ms,
            increment_ms,
        }
    }
}

/// Serializable clock bookkeeping, captured inside snapshots and exports.
///
/// A running clock exports with its elapsed time already folded in, so a
/// later import restores the exact remaining amounts and resumes the side
/// that was running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeControlState {
    pub config: TimeControlConfig,
    /// Remaining milliseconds per side; negative once a side has overrun.
    pub remaining: PerPlayer<i64>,
    /// The side whose clock was running, if any.
    pub active: Option<Player>,
    pub paused: bool,
}

/// The per-player countdown clock.
pub struct TimeControl {
    config: TimeControlConfig,
    remaining: PerPlayer<i64>,
    active: Option<Player>,
    /// Source timestamp when the active clock last (re)started; `None`
    /// while stopped or paused.
    started_at: Option<u64>,
    paused: bool,
    source: Arc<dyn TimeSource>,
}

impl std::fmt::Debug for TimeControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeControl")
            .field("config", &self.config)
            .field("remaining", &self.remaining)
            .field("active", &self.active)
            .field("paused", &self.paused)
            .finish_non_exhaustive()
    }
}

impl TimeControl {
    /// Create a clock with both banks full and nothing running.
    #[must_use]
    pub fn new(config: TimeControlConfig, source: Arc<dyn TimeSource>) -> Self {
        Self {
            config,
            remaining: PerPlayer::with_value(config.initial_ms as i64),
            active: None,
            started_at: None,
            paused: false,
            source,
        }
    }

    /// Create a clock backed by the system monotonic clock.
    #[must_use]
    pub fn with_system_clock(config: TimeControlConfig) -> Self {
        Self::new(config, Arc::new(MonotonicClock::new()))
    }

    /// Rebuild a clock from exported state, reusing a time source.
    ///
    /// A side that was running (and not paused) resumes counting from now.
    #[must_use]
    pub fn restore(state: TimeControlState, source: Arc<dyn TimeSource>) -> Self {
        let started_at = match (state.active, state.paused) {
            (Some(_), false) => Some(source.now_ms()),
            _ => None,
        };

        Self {
            config: state.config,
            remaining: state.remaining,
            active: state.active,
            started_at,
            paused: state.paused,
            source,
        }
    }

    /// The configuration this clock was built from.
    #[must_use]
    pub const fn config(&self) -> TimeControlConfig {
        self.config
    }

    /// The shared time source handle.
    #[must_use]
    pub fn source(&self) -> Arc<dyn TimeSource> {
        Arc::clone(&self.source)
    }

    /// Fold the running interval into stored remaining time.
    fn fold_elapsed(&mut self) {
        if let (Some(player), Some(started)) = (self.active, self.started_at) {
            let elapsed = self.source.now_ms().saturating_sub(started);
            self.remaining[player] -= elapsed as i64;
        }
        self.started_at = None;
    }

    /// Begin counting down for `player`.
    pub fn start_clock(&mut self, player: Player) {
        self.fold_elapsed();
        self.active = Some(player);
        self.started_at = Some(self.source.now_ms());
        self.paused = false;
    }

    /// Stop the running clock and credit the increment to the side that
    /// just moved.
    pub fn stop_clock(&mut self) {
        self.fold_elapsed();
        if let Some(player) = self.active {
            self.remaining[player] += self.config.increment_ms as i64;
        }
        self.active = None;
        self.paused = false;
    }

    /// Freeze the running clock without charging anyone.
    pub fn pause(&mut self) {
        self.fold_elapsed();
        self.paused = true;
    }

    /// Resume after `pause`; the paused interval is charged to nobody.
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        if self.active.is_some() {
            self.started_at = Some(self.source.now_ms());
        }
        self.paused = false;
    }

    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// The side whose clock is currently assigned, if any.
    #[must_use]
    pub const fn active(&self) -> Option<Player> {
        self.active
    }

    /// Remaining milliseconds for one side, computed at request time.
    /// Negative once the side has overrun its bank.
    #[must_use]
    pub fn time_remaining(&self, player: Player) -> i64 {
        let mut remaining = self.remaining[player];

        if self.active == Some(player) {
            if let Some(started) = self.started_at {
                let elapsed = self.source.now_ms().saturating_sub(started);
                remaining -= elapsed as i64;
            }
        }

        remaining
    }

    /// Remaining milliseconds for both sides.
    #[must_use]
    pub fn remaining(&self) -> PerPlayer<i64> {
        PerPlayer::new(
            self.time_remaining(Player::Black),
            self.time_remaining(Player::White),
        )
    }

    /// True when `player` has used up their bank.
    #[must_use]
    pub fn is_timeout(&self, player: Player) -> bool {
        self.time_remaining(player) <= 0
    }

    /// Capture the clock bookkeeping for snapshots and persistence.
    #[must_use]
    pub fn export_state(&self) -> TimeControlState {
        TimeControlState {
            config: self.config,
            remaining: self.remaining(),
            active: self.active,
            paused: self.paused,
        }
    }

    /// Restore bookkeeping captured by `export_state`.
    pub fn import_state(&mut self, state: TimeControlState) {
        self.config = state.config;
        self.remaining = state.remaining;
        self.active = state.active;
        self.paused = state.paused;
        self.started_at = match (state.active, state.paused) {
            (Some(_), false) => Some(self.source.now_ms()),
            _ => None,
        };
    }
}
