//! Game Events
//!
//! Events generated during a session for logging and replay checks.

use serde::{Deserialize, Serialize};

use crate::game::board::Rank;
use crate::game::input::Direction;
use crate::game::spawn::SpawnedTile;

/// Game event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// A tile appeared on an empty cell
    TileSpawned {
        /// Row of the new tile
        row: u8,
        /// Column of the new tile
        col: u8,
        /// Rank of the new tile
        rank: Rank,
    },

    /// A direction was resolved
    TurnResolved {
        /// Direction pressed
        direction: Direction,
        /// Whether any tile moved or merged
        moved: bool,
        /// Score gained this turn
        score_delta: u32,
        /// Score after the turn
        score: u32,
    },

    /// No legal move remains
    GameOver {
        /// Final score
        score: u32,
        /// Highest rank on the final board
        highest_rank: Rank,
    },
}

/// A game event stamped with the turn it happened on.
///
/// Starting tiles carry turn 0; the first resolved direction is turn 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Turn when the event occurred
    pub turn: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(turn: u32, data: GameEventData) -> Self {
        Self { turn, data }
    }

    /// Create tile spawned event.
    pub fn tile_spawned(turn: u32, tile: SpawnedTile) -> Self {
        Self::new(
            turn,
            GameEventData::TileSpawned {
                row: tile.row,
                col: tile.col,
                rank: tile.rank,
            },
        )
    }

    /// Create turn resolved event.
    pub fn turn_resolved(
        turn: u32,
        direction: Direction,
        moved: bool,
        score_delta: u32,
        score: u32,
    ) -> Self {
        Self::new(
            turn,
            GameEventData::TurnResolved {
                direction,
                moved,
                score_delta,
                score,
            },
        )
    }

    /// Create game over event.
    pub fn game_over(turn: u32, score: u32, highest_rank: Rank) -> Self {
        Self::new(turn, GameEventData::GameOver { score, highest_rank })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_spawned_event() {
        let tile = SpawnedTile { row: 2, col: 3, rank: 1 };
        let event = GameEvent::tile_spawned(0, tile);
        assert_eq!(event.turn, 0);
        assert_eq!(event.data, GameEventData::TileSpawned { row: 2, col: 3, rank: 1 });
    }

    #[test]
    fn test_event_json() {
        let event = GameEvent::turn_resolved(4, Direction::Left, true, 8, 24);
        let json = serde_json::to_string(&event).unwrap();
        let parsed: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }
}
