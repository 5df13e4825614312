//! Session Driver
//!
//! The outer loop: pull a direction, resolve the turn, stop on a terminal
//! board. Also replays recorded inputs for determinism checks.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::core::hash::StateHash;
use crate::core::rng::Seed;
use crate::game::board::Rank;
use crate::game::input::{InputLog, InputSource};
use crate::game::session::Session;

/// Configuration for driving a session.
#[derive(Clone, Debug)]
pub struct PlayConfig {
    /// Stop after this many turns even if moves remain
    pub max_turns: u32,
    /// Capture every direction in the returned log
    pub record_inputs: bool,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            max_turns: 100_000,
            record_inputs: true,
        }
    }
}

/// Why the loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// No legal move remains
    Terminal,
    /// The input source ran dry
    InputExhausted,
    /// `max_turns` reached
    TurnLimit,
}

/// Final tally of a driven session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Seed the session started with
    pub seed: Seed,
    /// Turns resolved
    pub turns: u32,
    /// Final score
    pub score: u32,
    /// Highest rank on the final board
    pub highest_rank: Rank,
    /// Why play stopped
    pub end_reason: EndReason,
    /// Final state hash, hex encoded
    pub final_hash: String,
}

impl SessionSummary {
    fn from_session(session: &Session, end_reason: EndReason) -> Self {
        Self {
            seed: session.seed(),
            turns: session.turn(),
            score: session.score(),
            highest_rank: session.board().highest_rank(),
            end_reason,
            final_hash: hex::encode(session.compute_hash()),
        }
    }
}

/// Drive `session` with `input` until it ends.
///
/// The terminal check runs before every turn, so a session that starts
/// terminal resolves no turns.
pub fn play<I: InputSource + ?Sized>(
    session: &mut Session,
    input: &mut I,
    config: &PlayConfig,
) -> (SessionSummary, InputLog) {
    let mut log = InputLog::new();

    let end_reason = loop {
        if session.is_terminal() {
            break EndReason::Terminal;
        }
        if session.turn() >= config.max_turns {
            break EndReason::TurnLimit;
        }
        let Some(direction) = input.next_direction() else {
            break EndReason::InputExhausted;
        };

        session.handle_tiles(direction);
        if config.record_inputs {
            log.record(direction);
        }
    };

    let summary = SessionSummary::from_session(session, end_reason);
    info!(
        seed = %summary.seed,
        turns = summary.turns,
        score = summary.score,
        highest_rank = summary.highest_rank,
        reason = ?summary.end_reason,
        "session finished"
    );

    (summary, log)
}

/// Replay a recorded session from its seed.
pub fn replay(seed: Seed, log: &InputLog) -> Session {
    let mut session = Session::new(seed);
    for &direction in log.directions() {
        if session.is_over() {
            break;
        }
        session.handle_tiles(direction);
    }
    session
}

/// Replay failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    /// The session ended before every recorded direction was used.
    #[error("session ended at turn {ended_at} but {recorded} directions were recorded")]
    EndedEarly {
        /// Turn on which the replayed session became terminal
        ended_at: u32,
        /// Directions in the log
        recorded: usize,
    },

    /// Replayed final state differs from the expected one.
    #[error("final state hash mismatch: expected {expected}, computed {computed}")]
    HashMismatch {
        /// Expected hash (hex)
        expected: String,
        /// Hash from replay (hex)
        computed: String,
    },
}

/// Replay `log` from `seed` and check the final state hash.
pub fn verify_replay(
    seed: Seed,
    log: &InputLog,
    expected: &StateHash,
) -> Result<Session, ReplayError> {
    let session = replay(seed, log);

    if (session.turn() as usize) < log.len() {
        return Err(ReplayError::EndedEarly {
            ended_at: session.turn(),
            recorded: log.len(),
        });
    }

    let computed = session.compute_hash();
    if &computed != expected {
        return Err(ReplayError::HashMismatch {
            expected: hex::encode(expected),
            computed: hex::encode(computed),
        });
    }

    Ok(session)
}
