//! Terminal-State Detection
//!
//! A board is terminal when no direction can move or merge anything.

use crate::game::board::Board;
use crate::GRID_SIZE;

/// True if no legal move remains.
///
/// Requires every cell occupied and no two horizontally or vertically
/// adjacent cells sharing a rank, across the whole grid.
pub fn is_terminal(board: &Board) -> bool {
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let rank = board.rank_at(row, col);
            if rank == 0 {
                return false;
            }
            if col + 1 < GRID_SIZE && board.rank_at(row, col + 1) == rank {
                return false;
            }
            if row + 1 < GRID_SIZE && board.rank_at(row + 1, col) == rank {
                return false;
            }
        }
    }
    true
}
