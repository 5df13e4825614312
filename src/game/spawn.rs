//! Tile Spawning
//!
//! Places exactly one new tile on an empty cell, driven by the session's
//! 8-bit generator. Two bytes are drawn per spawn: the slot, then the rank.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::rng::TileRng;
use crate::game::board::{Board, Rank};

/// Rolls strictly above this spawn a rank-2 tile ("4"); otherwise rank 1 ("2").
///
/// 25 of 256 rolls, about 9.8%.
pub const FOUR_THRESHOLD: u8 = 230;

/// Where a tile was placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnedTile {
    /// Row of the new tile
    pub row: u8,
    /// Column of the new tile
    pub col: u8,
    /// Rank of the new tile (1 or 2)
    pub rank: Rank,
}

/// Spawn failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpawnError {
    /// Every cell is occupied.
    #[error("no empty cell to spawn into")]
    BoardFull,

    /// Slot index not below the number of empty cells.
    #[error("spawn slot {position} out of range for {free} empty cells")]
    PositionOutOfRange {
        /// Requested slot
        position: u8,
        /// Empty cells available
        free: u8,
    },
}

/// Rank for a spawn roll.
#[inline]
pub fn rank_for_roll(roll: u8) -> Rank {
    if roll > FOUR_THRESHOLD {
        2
    } else {
        1
    }
}

/// Spawn one tile using two draws from `rng`.
///
/// A full board returns [`SpawnError::BoardFull`] without touching `rng`.
pub fn spawn_tile(board: &mut Board, rng: &mut TileRng) -> Result<SpawnedTile, SpawnError> {
    let free = board.count_empty();
    if free == 0 {
        return Err(SpawnError::BoardFull);
    }

    let position = rng.next_u8() % free;
    let roll = rng.next_u8();
    place_tile(board, position, roll)
}

/// Place a tile in slot `position` with rank chosen by `roll`.
///
/// A countdown starts at `free - 1` and drops by one at each empty cell in
/// row-major order; the tile lands on the empty cell where the countdown
/// reaches `position`. Slot 0 is therefore the last empty cell and slot
/// `free - 1` the first.
pub fn place_tile(board: &mut Board, position: u8, roll: u8) -> Result<SpawnedTile, SpawnError> {
    let free = board.count_empty();
    if free == 0 {
        return Err(SpawnError::BoardFull);
    }
    if position >= free {
        return Err(SpawnError::PositionOutOfRange { position, free });
    }

    let mut countdown = free - 1;
    let (row, col) = Board::positions()
        .filter(|&(row, col)| board.rank_at(row, col) == 0)
        .find(|_| {
            if countdown > position {
                countdown -= 1;
                false
            } else {
                true
            }
        })
        .ok_or(SpawnError::BoardFull)?;

    let rank = rank_for_roll(roll);
    board.set_rank(row, col, rank);

    Ok(SpawnedTile {
        row: row as u8,
        col: col as u8,
        rank,
    })
}
