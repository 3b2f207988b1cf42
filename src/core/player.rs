//! Player identification and per-player data storage.
//!
//! ## Player
//!
//! The two disc colors. Black always moves first.
//!
//! ## PerPlayer
//!
//! Two-slot per-player storage indexed by `Player`, used for clocks,
//! player names, and anything else that exists once per side.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::board::Cell;

/// A player color. Black moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// Get the opposing color.
    #[must_use]
    pub const fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// The cell value a disc of this color occupies.
    #[must_use]
    pub const fn cell(self) -> Cell {
        match self {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }

    /// Iterate over both colors, black first.
    pub fn both() -> impl Iterator<Item = Player> {
        [Player::Black, Player::White].into_iter()
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Black => write!(f, "Black"),
            Player::White => write!(f, "White"),
        }
    }
}

/// Per-player data storage with O(1) access by color.
///
/// ## Example
///
/// ```
/// use othello_engine::core::{PerPlayer, Player};
///
/// let mut remaining: PerPlayer<i64> = PerPlayer::with_value(60_000);
///
/// assert_eq!(remaining[Player::Black], 60_000);
///
/// remaining[Player::White] -= 1_500;
/// assert_eq!(remaining[Player::White], 58_500);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerPlayer<T> {
    pub black: T,
    pub white: T,
}

impl<T> PerPlayer<T> {
    /// Create with explicit values for each side.
    #[must_use]
    pub const fn new(black: T, white: T) -> Self {
        Self { black, white }
    }

    /// Create with the same value for both sides.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            black: value.clone(),
            white: value,
        }
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: Player) -> &T {
        match player {
            Player::Black => &self.black,
            Player::White => &self.white,
        }
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: Player) -> &mut T {
        match player {
            Player::Black => &mut self.black,
            Player::White => &mut self.white,
        }
    }

    /// Iterate over (Player, &T) pairs, black first.
    pub fn iter(&self) -> impl Iterator<Item = (Player, &T)> {
        [(Player::Black, &self.black), (Player::White, &self.white)].into_iter()
    }
}

impl<T> Index<Player> for PerPlayer<T> {
    type Output = T;

    fn index(&self, player: Player) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<Player> for PerPlayer<T> {
    fn index_mut(&mut self, player: Player) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Disc counts for both sides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    pub black: u8,
    pub white: u8,
}

impl Score {
    /// Create a score from raw counts.
    #[must_use]
    pub const fn new(black: u8, white: u8) -> Self {
        Self { black, white }
    }

    /// Disc count for one side.
    #[must_use]
    pub const fn for_player(self, player: Player) -> u8 {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    /// Total discs on the board.
    #[must_use]
    pub const fn total(self) -> u8 {
        self.black + self.white
    }

    /// The side with strictly more discs, or `None` on a tie.
    #[must_use]
    pub fn leader(self) -> Option<Player> {
        match self.black.cmp(&self.white) {
            std::cmp::Ordering::Greater => Some(Player::Black),
            std::cmp::Ordering::Less => Some(Player::White),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.black, self.white)
    }
}
