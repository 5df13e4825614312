//! Compaction and Merge
//!
//! Both operations walk each line from the edge named by the direction
//! inward. Offset 0 is the cell on that edge; offset 3 the far cell.
//! The scan order decides which tile of an equal pair survives a merge.

use crate::game::board::Board;
use crate::game::input::Direction;
use crate::{GRID_SIZE, MAX_RANK};

/// Board coordinates of the cell `offset` steps in from the edge, on `line`.
///
/// Lines are rows for left/right and columns for up/down.
#[inline]
fn line_cell(direction: Direction, line: usize, offset: usize) -> (usize, usize) {
    let far = GRID_SIZE - 1;
    match direction {
        Direction::Left => (line, offset),
        Direction::Right => (line, far - offset),
        Direction::Up => (offset, line),
        Direction::Down => (far - offset, line),
    }
}

/// Slide every tile toward `direction`'s edge, closing gaps.
///
/// Ranks and relative order are untouched. Returns the number of tiles that
/// changed cell; only zero versus nonzero is meaningful.
///
/// ```
/// use tile_merge::game::{board::Board, input::Direction, moves::compact};
///
/// let mut board = Board::from_rows([[0, 1, 1, 2], [0; 4], [0; 4], [0; 4]]).unwrap();
/// assert!(compact(&mut board, Direction::Left) > 0);
/// assert_eq!(board.rows()[0], [1, 1, 2, 0]);
/// ```
pub fn compact(board: &mut Board, direction: Direction) -> u32 {
    let mut moves = 0;

    for line in 0..GRID_SIZE {
        let mut write = 0;
        for read in 0..GRID_SIZE {
            let (row, col) = line_cell(direction, line, read);
            let rank = board.rank_at(row, col);
            if rank == 0 {
                continue;
            }
            if read != write {
                let (to_row, to_col) = line_cell(direction, line, write);
                board.set_rank(to_row, to_col, rank);
                board.set_rank(row, col, 0);
                moves += 1;
            }
            write += 1;
        }
    }

    moves
}

/// Merge adjacent equal tiles toward `direction`'s edge in a single pass.
///
/// The tile nearer the edge is promoted one rank and the farther one
/// emptied. Pairs are visited edge-first, so a tile emptied by a merge can't
/// pair again in the same call. Returns the score gained: `2^new_rank` per
/// merge.
pub fn merge(board: &mut Board, direction: Direction) -> u32 {
    let mut score_delta = 0u32;

    for line in 0..GRID_SIZE {
        for offset in 0..GRID_SIZE - 1 {
            let (row, col) = line_cell(direction, line, offset);
            let (far_row, far_col) = line_cell(direction, line, offset + 1);

            let rank = board.rank_at(row, col);
            if rank == 0 || board.rank_at(far_row, far_col) != rank {
                continue;
            }

            let merged = rank + 1;
            debug_assert!(merged <= MAX_RANK, "merge produced rank {}", merged);
            board.set_rank(row, col, merged.min(MAX_RANK));
            board.set_rank(far_row, far_col, 0);
            score_delta += 1u32 << merged;
        }
    }

    score_delta
}
