//! # Tile Merge
//!
//! Deterministic 4x4 sliding-tile merge engine ("2048").
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        TILE MERGE                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── rng.rs      - 8-bit two-register shift/xor generator    │
//! │  └── hash.rs     - State hashing for verification            │
//! │                                                              │
//! │  game/           - Game logic (deterministic)                │
//! │  ├── board.rs    - Rank grid                                 │
//! │  ├── moves.rs    - Compaction and merge                      │
//! │  ├── spawn.rs    - Tile spawning                             │
//! │  ├── terminal.rs - Game-over detection                       │
//! │  ├── session.rs  - Turn resolution                           │
//! │  ├── play.rs     - Outer loop and replay                     │
//! │  ├── input.rs    - Directions and input sources              │
//! │  ├── labels.rs   - Tile labels                               │
//! │  └── events.rs   - Game events                               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are **100% deterministic**:
//! - All arithmetic is integer, wrapping where the generator needs it
//! - Board scans run in a fixed row-major or edge-inward order
//! - No system time dependencies outside [`core::rng::ClockSeed`]
//! - All randomness comes from the seeded [`core::rng::TileRng`]
//!
//! Given the same seed and the same directions, a session produces
//! **identical boards, scores and state hashes** on any platform.
//!
//! ```
//! use tile_merge::{Direction, Seed, Session};
//!
//! let mut a = Session::new(Seed::POWER_ON);
//! let mut b = Session::new(Seed::POWER_ON);
//! for direction in [Direction::Left, Direction::Up, Direction::Right] {
//!     a.handle_tiles(direction);
//!     b.handle_tiles(direction);
//! }
//! assert_eq!(a.compute_hash(), b.compute_hash());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use core::rng::{ClockSeed, Seed, SeedSource, TileRng};
pub use game::board::{Board, Rank};
pub use game::input::{CycleInput, Direction, InputLog, InputSource, ScriptedInput};
pub use game::play::{play, replay, verify_replay, PlayConfig, SessionSummary};
pub use game::session::{Session, TurnResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rows and columns on the board
pub const GRID_SIZE: usize = 4;

/// Highest representable rank (tile value 65536)
pub const MAX_RANK: u8 = 16;
