//! Tile Labels
//!
//! Fixed-width text for each rank, sized for a 4-character display cell.

use crate::MAX_RANK;

/// Display label for every rank `0..=MAX_RANK`, right-aligned in 4 columns.
pub static TILE_LABELS: [&str; MAX_RANK as usize + 1] = [
    "    ", "   2", "   4", "   8", "  16", "  32", "  64", " 128", " 256", " 512", "1024",
    "2048", "4096", "8192", " 16k", " 32k", " 64k",
];

/// Width of a rendered tile label.
pub const LABEL_WIDTH: usize = 4;

/// Label for a rank. Out-of-range ranks render as `"????"`.
#[inline]
pub fn label(rank: u8) -> &'static str {
    TILE_LABELS.get(rank as usize).copied().unwrap_or("????")
}

/// Displayed value of a rank (0 for an empty cell).
#[inline]
pub const fn tile_value(rank: u8) -> u32 {
    if rank == 0 {
        0
    } else {
        1 << rank
    }
}
