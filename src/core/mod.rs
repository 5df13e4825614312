//! Core deterministic primitives.
//!
//! Everything here is bit-exact across platforms: 8-bit wrapping
//! arithmetic for the generator and a fixed update order for hashing.

pub mod hash;
pub mod rng;

// Re-export core types
pub use hash::{compute_state_hash, StateHash, StateHasher};
pub use rng::{ClockSeed, Seed, SeedError, SeedSource, TileRng};
