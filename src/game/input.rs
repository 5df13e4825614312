//! Input Capture and Recording
//!
//! One debounced direction per turn. Sources implement [`InputSource`];
//! every resolved direction can be captured in an [`InputLog`] for replay.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::hash::{StateHash, StateHasher};

// =============================================================================
// DIRECTION
// =============================================================================

/// A direction to slide and merge tiles toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// Toward row 0
    Up = 0,
    /// Toward row 3
    Down = 1,
    /// Toward column 3
    Right = 2,
    /// Toward column 0
    Left = 3,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Right,
        Direction::Left,
    ];

    /// Map a key to a direction: WASD or vi keys (`hjkl`), case-insensitive.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' | 'k' => Some(Direction::Up),
            's' | 'j' => Some(Direction::Down),
            'd' | 'l' => Some(Direction::Right),
            'a' | 'h' => Some(Direction::Left),
            _ => None,
        }
    }

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Right => "right",
            Direction::Left => "left",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text that names no direction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction {0:?}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Accepts a full name (`up`, `Down`, ...) or a single key (see [`Direction::from_key`]).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let mut chars = text.chars();
        if let (Some(key), None) = (chars.next(), chars.next()) {
            return Self::from_key(key).ok_or_else(|| ParseDirectionError(s.to_string()));
        }

        Self::ALL
            .into_iter()
            .find(|dir| dir.name().eq_ignore_ascii_case(text))
            .ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}

// =============================================================================
// INPUT SOURCES
// =============================================================================

/// Producer of debounced direction events.
///
/// Returns `None` once no further input will arrive.
pub trait InputSource {
    /// Block until the next direction is available.
    fn next_direction(&mut self) -> Option<Direction>;
}

/// A fixed, finite script of directions.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    queue: VecDeque<Direction>,
}

impl ScriptedInput {
    /// Script from a list of directions.
    pub fn new(directions: impl IntoIterator<Item = Direction>) -> Self {
        Self {
            queue: directions.into_iter().collect(),
        }
    }

    /// Parse a key string such as `"wasd dd"`. Whitespace and commas are ignored.
    pub fn from_keys(keys: &str) -> Result<Self, ParseDirectionError> {
        let queue = keys
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(|c| Direction::from_key(c).ok_or_else(|| ParseDirectionError(c.to_string())))
            .collect::<Result<VecDeque<_>, _>>()?;
        Ok(Self { queue })
    }

    /// Directions left in the script.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_direction(&mut self) -> Option<Direction> {
        self.queue.pop_front()
    }
}

/// Endless rotation up, right, down, left.
#[derive(Clone, Debug, Default)]
pub struct CycleInput {
    step: usize,
}

impl CycleInput {
    const ORDER: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];
}

impl InputSource for CycleInput {
    fn next_direction(&mut self) -> Option<Direction> {
        let dir = Self::ORDER[self.step % Self::ORDER.len()];
        self.step = self.step.wrapping_add(1);
        Some(dir)
    }
}

// =============================================================================
// INPUT LOG
// =============================================================================

/// Every direction resolved in one session, in turn order.
///
/// Together with the session seed this fully determines the session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputLog {
    directions: Vec<Direction>,
}

impl InputLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the direction for the next turn.
    pub fn record(&mut self, direction: Direction) {
        self.directions.push(direction);
    }

    /// Recorded directions.
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Number of recorded turns.
    pub fn len(&self) -> usize {
        self.directions.len()
    }

    /// True if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    /// Script that plays this log back.
    pub fn to_script(&self) -> ScriptedInput {
        ScriptedInput::new(self.directions.iter().copied())
    }

    /// Hash of the recorded directions.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_input_log();
        hasher.update_u32(self.directions.len() as u32);
        for dir in &self.directions {
            hasher.update_u8(*dir as u8);
        }
        hasher.finalize()
    }
}

impl FromIterator<Direction> for InputLog {
    fn from_iter<T: IntoIterator<Item = Direction>>(iter: T) -> Self {
        Self {
            directions: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
