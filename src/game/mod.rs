//! Game Logic Module
//!
//! The board engine and the session that drives it. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `board`: 4x4 rank grid and queries
//! - `labels`: Fixed-width tile labels
//! - `input`: Directions, input sources, input log
//! - `moves`: Compaction and merge along a direction
//! - `spawn`: Random tile placement
//! - `terminal`: Game-over detection
//! - `session`: One game's state and turn resolution
//! - `play`: Outer loop and replay
//! - `events`: Game events for logging and replay checks

pub mod board;
pub mod events;
pub mod input;
pub mod labels;
pub mod moves;
pub mod play;
pub mod session;
pub mod spawn;
pub mod terminal;

// Re-export key types
pub use board::{Board, BoardError, Rank};
pub use events::{GameEvent, GameEventData};
pub use input::{CycleInput, Direction, InputLog, InputSource, ParseDirectionError, ScriptedInput};
pub use play::{play, replay, verify_replay, EndReason, PlayConfig, ReplayError, SessionSummary};
pub use session::{Phase, Session, TurnResult};
pub use spawn::{SpawnError, SpawnedTile};
