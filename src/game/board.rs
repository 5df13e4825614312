//! Board State
//!
//! The 4x4 grid of tile ranks. Rank 0 is an empty cell, rank `r` displays
//! `2^r`. Storage and queries only; movement lives in `moves`, spawning in
//! `spawn`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::labels::label;
use crate::{GRID_SIZE, MAX_RANK};

/// Tile rank: 0 = empty, `r` = value `2^r`.
pub type Rank = u8;

/// Errors building a board from external data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    /// A cell held a rank above [`MAX_RANK`].
    #[error("rank {rank} at ({row}, {col}) exceeds maximum rank {max}", max = MAX_RANK)]
    RankOutOfRange {
        /// Row of the offending cell
        row: usize,
        /// Column of the offending cell
        col: usize,
        /// Rank found there
        rank: Rank,
    },
}

/// 4x4 grid of ranks, indexed `[row][col]`.
///
/// Every cell holds a rank in `0..=MAX_RANK`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    cells: [[Rank; GRID_SIZE]; GRID_SIZE],
}

/// Unchecked wire form; deserialized boards go through [`Board::from_rows`].
#[derive(Deserialize)]
struct RawBoard {
    cells: [[Rank; GRID_SIZE]; GRID_SIZE],
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        Board::from_rows(raw.cells)
    }
}

impl Board {
    /// A board with every cell empty.
    pub const EMPTY: Board = Board {
        cells: [[0; GRID_SIZE]; GRID_SIZE],
    };

    /// Build a board from rows of ranks.
    ///
    /// ```
    /// use tile_merge::game::board::Board;
    ///
    /// let board = Board::from_rows([[0, 1, 1, 2], [0; 4], [0; 4], [0; 4]]).unwrap();
    /// assert_eq!(board.rank_at(0, 3), 2);
    /// assert_eq!(board.count_empty(), 13);
    /// ```
    pub fn from_rows(rows: [[Rank; GRID_SIZE]; GRID_SIZE]) -> Result<Self, BoardError> {
        for (row, line) in rows.iter().enumerate() {
            for (col, &rank) in line.iter().enumerate() {
                if rank > MAX_RANK {
                    return Err(BoardError::RankOutOfRange { row, col, rank });
                }
            }
        }
        Ok(Self { cells: rows })
    }

    /// Copy of the rows.
    #[inline]
    pub fn rows(&self) -> [[Rank; GRID_SIZE]; GRID_SIZE] {
        self.cells
    }

    /// Rank at `(row, col)`.
    ///
    /// # Panics
    ///
    /// If `row` or `col` is outside `0..GRID_SIZE`.
    #[inline]
    pub fn rank_at(&self, row: usize, col: usize) -> Rank {
        self.cells[row][col]
    }

    #[inline]
    pub(crate) fn set_rank(&mut self, row: usize, col: usize, rank: Rank) {
        debug_assert!(rank <= MAX_RANK, "rank {} exceeds {}", rank, MAX_RANK);
        self.cells[row][col] = rank;
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }

    /// All `(row, col)` positions in row-major order.
    pub fn positions() -> impl Iterator<Item = (usize, usize)> {
        (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| (row, col)))
    }

    /// Ranks in row-major order.
    pub fn ranks(&self) -> impl Iterator<Item = Rank> + '_ {
        self.cells.iter().flat_map(|line| line.iter().copied())
    }

    /// Number of empty cells.
    #[inline]
    pub fn count_empty(&self) -> u8 {
        self.ranks().filter(|&rank| rank == 0).count() as u8
    }

    /// Number of occupied cells.
    #[inline]
    pub fn count_occupied(&self) -> u8 {
        (GRID_SIZE * GRID_SIZE) as u8 - self.count_empty()
    }

    /// True if no cell is empty.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count_empty() == 0
    }

    /// Highest rank on the board (0 for an empty board).
    pub fn highest_rank(&self) -> Rank {
        self.ranks().max().unwrap_or(0)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(")?;
        for (i, line) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            for rank in line {
                write!(f, "{:x}", rank)?;
            }
        }
        write!(f, ")")
    }
}

/// Four 20-column lines, each cell a `|` followed by its 4-character label.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &rank in line {
                write!(f, "|{}", label(rank))?;
            }
        }
        Ok(())
    }
}
