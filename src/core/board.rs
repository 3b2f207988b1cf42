//! The rules engine: board state, move legality, and disc flipping.
//!
//! `Board` is the single source of truth for game rules. It owns an 8x8
//! grid of cells plus whose turn it is, and exposes:
//!
//! - move legality (`is_valid_move`) and enumeration (`valid_moves`)
//! - mutating move execution (`take_turn`) with the silent auto-pass rule
//! - non-mutating move execution (`with_move`) for search exploration
//! - game-over and winner detection
//! - a display-only annotated copy for move hints
//!
//! A move is legal iff the cell is empty and at least one of the 8 compass
//! directions holds a run of opponent discs terminated by a mover-colored
//! disc with no empty or off-board break. Committing the move flips every
//! such run.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::coord::{Coord, Direction, DIRECTIONS, SIZE};
use super::error::{GameError, GameResult};
use super::player::{Player, Score};

/// The value of a single board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl Cell {
    /// True for cells holding no disc.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// A display-only cell value with legal moves marked.
///
/// Produced by [`Board::annotated`] for rendering hints. This type never
/// flows back into rules functions; the distinction is enforced statically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnnotatedCell {
    Empty,
    Black,
    White,
    PossibleMove,
}

/// The 8x8 cell grid.
pub type Grid = [[Cell; SIZE as usize]; SIZE as usize];

/// An annotated 8x8 grid for display.
pub type AnnotatedGrid = [[AnnotatedCell; SIZE as usize]; SIZE as usize];

/// A run of opponent discs that a move would flip in one direction.
/// At most 6 discs fit between a placement and its bracket on an 8-cell line.
type FlipRun = SmallVec<[Coord; 6]>;

/// The live game board: 64 cells plus whose turn it is.
///
/// Invariant: black + white + empty cell counts always sum to 64.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Grid,
    turn: Player,
}

impl Board {
    /// Create a board in the standard starting position.
    ///
    /// White on d4/e5, black on d5/e4, black to move.
    #[must_use]
    pub fn new() -> Self {
        let mut cells = [[Cell::Empty; SIZE as usize]; SIZE as usize];

        cells[3][3] = Cell::White;
        cells[3][4] = Cell::Black;
        cells[4][3] = Cell::Black;
        cells[4][4] = Cell::White;

        Self {
            cells,
            turn: Player::Black,
        }
    }

    /// Create a board from a caller-supplied grid, black to move.
    ///
    /// The grid shape is fixed by the type; cell contents are taken as-is.
    #[must_use]
    pub fn from_cells(cells: Grid) -> Self {
        Self {
            cells,
            turn: Player::Black,
        }
    }

    /// Whose turn it is.
    #[must_use]
    pub const fn turn(&self) -> Player {
        self.turn
    }

    /// Read access to the raw grid.
    #[must_use]
    pub const fn cells(&self) -> &Grid {
        &self.cells
    }

    /// Cell value at a validated coordinate.
    #[must_use]
    pub fn tile(&self, coord: Coord) -> Cell {
        self.cells[coord.row() as usize][coord.col() as usize]
    }

    /// Cell value at raw indices, for callers holding unvalidated input.
    pub fn tile_at(&self, col: i32, row: i32) -> GameResult<Cell> {
        if (0..i32::from(SIZE)).contains(&col) && (0..i32::from(SIZE)).contains(&row) {
            Ok(self.cells[row as usize][col as usize])
        } else {
            Err(GameError::OutOfBounds { col, row })
        }
    }

    fn set(&mut self, coord: Coord, cell: Cell) {
        self.cells[coord.row() as usize][coord.col() as usize] = cell;
    }

    /// Count discs of both colors. O(64).
    #[must_use]
    pub fn score(&self) -> Score {
        let mut black = 0;
        let mut white = 0;

        for row in &self.cells {
            for cell in row {
                match cell {
                    Cell::Black => black += 1,
                    Cell::White => white += 1,
                    Cell::Empty => {}
                }
            }
        }

        Score::new(black, white)
    }

    /// True if any of the 8 neighbouring cells holds a disc.
    ///
    /// Cheap pre-filter before the full directional walk; an isolated empty
    /// cell can never be a legal move.
    #[must_use]
    pub fn has_adjacent_piece(&self, coord: Coord) -> bool {
        coord.neighbours().any(|n| !self.tile(n).is_empty())
    }

    /// Walk outward from `coord` and collect the opponent run that placing
    /// a `mover` disc would flip in `dir`. Empty when the direction is not
    /// flippable (run broken by an empty cell, the board edge, or no run
    /// at all).
    fn run_in_direction(&self, mover: Player, coord: Coord, dir: Direction) -> FlipRun {
        let opponent = mover.opponent().cell();
        let own = mover.cell();

        let mut run = FlipRun::new();
        let mut current = coord;

        while let Some(next) = current.step(dir) {
            let cell = self.tile(next);
            if cell == opponent {
                run.push(next);
                current = next;
            } else if cell == own {
                return run;
            } else {
                break;
            }
        }

        FlipRun::new()
    }

    fn is_valid_move_for(&self, mover: Player, coord: Coord) -> bool {
        self.tile(coord).is_empty()
            && self.has_adjacent_piece(coord)
            && DIRECTIONS
                .iter()
                .any(|&dir| !self.run_in_direction(mover, coord, dir).is_empty())
    }

    /// True iff the current mover may legally play at `coord`.
    #[must_use]
    pub fn is_valid_move(&self, coord: Coord) -> bool {
        self.is_valid_move_for(self.turn, coord)
    }

    /// All legal coordinates for the current mover, in row-major scan order.
    #[must_use]
    pub fn valid_moves(&self) -> Vec<Coord> {
        Coord::all().filter(|&c| self.is_valid_move(c)).collect()
    }

    fn has_any_move(&self, mover: Player) -> bool {
        Coord::all().any(|c| self.is_valid_move_for(mover, c))
    }

    /// Play a move for the current mover, flipping every bracketed run.
    ///
    /// The disc is placed first; if no direction turns out to be flippable
    /// the placement is reverted and the board is unchanged. After a
    /// successful move the turn switches, and if the new mover has no legal
    /// move while the game is not yet over, the turn silently switches back
    /// (no pass is recorded).
    pub fn take_turn(&mut self, coord: Coord) -> GameResult<()> {
        if !self.tile(coord).is_empty() {
            return Err(GameError::InvalidMove {
                reason: "cell occupied",
            });
        }

        let mover = self.turn;
        self.set(coord, mover.cell());

        let mut flipped = FlipRun::new();
        for &dir in &DIRECTIONS {
            flipped.extend(self.run_in_direction(mover, coord, dir));
        }

        if flipped.is_empty() {
            self.set(coord, Cell::Empty);
            return Err(GameError::InvalidMove {
                reason: "no pieces would flip",
            });
        }

        for c in flipped {
            self.set(c, mover.cell());
        }

        self.turn = mover.opponent();

        // Auto-pass: a mover with no reply forfeits the turn silently.
        if !self.has_any_move(self.turn) && !self.is_game_over() {
            self.turn = mover;
        }

        Ok(())
    }

    /// Play a move on a private copy, leaving `self` untouched.
    ///
    /// Returns `None` when the move is illegal. This is the entry point for
    /// search exploration; candidate moves never mutate the live board.
    #[must_use]
    pub fn with_move(&self, coord: Coord) -> Option<Board> {
        let mut copy = self.clone();
        copy.take_turn(coord).ok().map(|()| copy)
    }

    /// True when the board is full or neither color has a legal move.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.score().total() == 64
            || (!self.has_any_move(self.turn) && !self.has_any_move(self.turn.opponent()))
    }

    /// The color with strictly more discs, or `None` on a tie.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        self.score().leader()
    }

    /// A display copy with the current mover's legal cells marked.
    #[must_use]
    pub fn annotated(&self) -> AnnotatedGrid {
        let mut grid = [[AnnotatedCell::Empty; SIZE as usize]; SIZE as usize];

        for coord in Coord::all() {
            let annotated = match self.tile(coord) {
                Cell::Black => AnnotatedCell::Black,
                Cell::White => AnnotatedCell::White,
                Cell::Empty if self.is_valid_move(coord) => AnnotatedCell::PossibleMove,
                Cell::Empty => AnnotatedCell::Empty,
            };
            grid[coord.row() as usize][coord.col() as usize] = annotated;
        }

        grid
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    /// Text rendering for logs and test failures: `X` black, `O` white,
    /// `.` empty.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for (row_idx, row) in self.cells.iter().enumerate() {
            write!(f, "{} ", row_idx + 1)?;
            for cell in row {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::Black => 'X',
                    Cell::White => 'O',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "{} to move", self.turn)
    }
}
