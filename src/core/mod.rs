//! Core types: players, coordinates, the rules engine, errors, RNG.

pub mod board;
pub mod coord;
pub mod error;
pub mod player;
pub mod rng;

pub use board::{AnnotatedCell, AnnotatedGrid, Board, Cell, Grid};
pub use coord::{Coord, Direction, DIRECTIONS, SIZE};
pub use error::{GameError, GameResult};
pub use player::{PerPlayer, Player, Score};
pub use rng::GameRng;
