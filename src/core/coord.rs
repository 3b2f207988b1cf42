//! Board coordinates and compass directions.
//!
//! Coordinates are column/row pairs in `0..8`, printed in standard Othello
//! notation: column letter `a`-`h` followed by 1-based row, so `(3, 2)` is
//! `d3`. Construction is range-checked; a `Coord` that exists is on the
//! board.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::GameError;

/// Board side length. The grid is always `SIZE` x `SIZE`.
pub const SIZE: u8 = 8;

/// A validated board coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Coord {
    col: u8,
    row: u8,
}

impl Coord {
    /// Create a coordinate, failing with `OutOfBounds` outside the grid.
    pub fn new(col: u8, row: u8) -> Result<Self, GameError> {
        if col < SIZE && row < SIZE {
            Ok(Self { col, row })
        } else {
            Err(GameError::OutOfBounds {
                col: i32::from(col),
                row: i32::from(row),
            })
        }
    }

    /// Column index, `0..8` (`a`-`h`).
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Row index, `0..8` (rows `1`-`8`).
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Flat row-major index, `0..64`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.row as usize * SIZE as usize + self.col as usize
    }

    /// Iterate every coordinate in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..SIZE).flat_map(|row| (0..SIZE).map(move |col| Coord { col, row }))
    }

    /// Step one cell in a direction; `None` if that leaves the board.
    #[must_use]
    pub fn step(self, dir: Direction) -> Option<Coord> {
        let col = i16::from(self.col) + i16::from(dir.dc);
        let row = i16::from(self.row) + i16::from(dir.dr);

        if (0..i16::from(SIZE)).contains(&col) && (0..i16::from(SIZE)).contains(&row) {
            Some(Coord {
                col: col as u8,
                row: row as u8,
            })
        } else {
            None
        }
    }

    /// The 8 neighbouring coordinates that exist on the board.
    pub fn neighbours(self) -> impl Iterator<Item = Coord> {
        DIRECTIONS.iter().filter_map(move |&dir| self.step(dir))
    }
}

impl TryFrom<(u8, u8)> for Coord {
    type Error = GameError;

    fn try_from((col, row): (u8, u8)) -> Result<Self, Self::Error> {
        Coord::new(col, row)
    }
}

impl From<Coord> for (u8, u8) {
    fn from(coord: Coord) -> Self {
        (coord.col, coord.row)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

impl FromStr for Coord {
    type Err = GameError;

    /// Parse Othello notation (`"d3"`). Case-insensitive on the column.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (col_ch, row_ch) = match (chars.next(), chars.next(), chars.next()) {
            (Some(c), Some(r), None) => (c.to_ascii_lowercase(), r),
            _ => {
                return Err(GameError::MalformedImport(format!(
                    "bad coordinate notation: {s:?}"
                )))
            }
        };

        let col = (col_ch as i32) - ('a' as i32);
        let row = match row_ch.to_digit(10) {
            Some(d) => d as i32 - 1,
            None => {
                return Err(GameError::MalformedImport(format!(
                    "bad coordinate notation: {s:?}"
                )))
            }
        };

        if (0..i32::from(SIZE)).contains(&col) && (0..i32::from(SIZE)).contains(&row) {
            Ok(Coord {
                col: col as u8,
                row: row as u8,
            })
        } else {
            Err(GameError::OutOfBounds { col, row })
        }
    }
}

/// A compass direction as a column/row delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Direction {
    pub dc: i8,
    pub dr: i8,
}

/// The 8 compass directions the flip walk scans.
pub const DIRECTIONS: [Direction; 8] = [
    Direction { dc: -1, dr: -1 },
    Direction { dc: 0, dr: -1 },
    Direction { dc: 1, dr: -1 },
    Direction { dc: -1, dr: 0 },
    Direction { dc: 1, dr: 0 },
    Direction { dc: -1, dr: 1 },
    Direction { dc: 0, dr: 1 },
    Direction { dc: 1, dr: 1 },
];
