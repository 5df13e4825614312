//! Game Session
//!
//! Owns everything one game mutates: board, score, generator, turn counter.
//! Each turn runs compact, merge, compact, then spawns a tile if anything
//! changed.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::core::hash::{compute_state_hash, StateHash};
use crate::core::rng::{Seed, SeedSource, TileRng};
use crate::game::board::{Board, Rank};
use crate::game::events::GameEvent;
use crate::game::input::Direction;
use crate::game::moves::{compact, merge};
use crate::game::spawn::{spawn_tile, SpawnedTile};
use crate::game::terminal::is_terminal;

/// Tiles placed when a session starts.
pub const STARTING_TILES: usize = 2;

/// Current phase of the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Accepting directions
    #[default]
    Playing,
    /// Terminal board reached
    Over,
}

/// Outcome of one resolved direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResult {
    /// Direction that was resolved
    pub direction: Direction,
    /// Tiles shifted across both compactions
    pub moves: u32,
    /// Score gained by the merge step
    pub score_delta: u32,
    /// Tile placed after the move, if the board changed
    pub spawned: Option<SpawnedTile>,
    /// Whether the board is terminal after this turn
    pub game_over: bool,
}

impl TurnResult {
    /// True if the direction changed the board.
    pub fn changed(&self) -> bool {
        self.moves != 0 || self.score_delta != 0
    }
}

/// State of one game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Seed loaded at session start (for verification)
    seed: Seed,

    /// Generator state
    rng: TileRng,

    board: Board,

    score: u32,

    /// Directions resolved so far
    turn: u32,

    phase: Phase,

    /// Events since the last `take_events`
    #[serde(skip)]
    pending_events: Vec<GameEvent>,
}

impl Session {
    /// Start a game: empty board, zero score, two starting tiles.
    pub fn new(seed: Seed) -> Self {
        let mut session = Self {
            seed,
            rng: TileRng::new(seed),
            board: Board::EMPTY,
            score: 0,
            turn: 0,
            phase: Phase::Playing,
            pending_events: Vec::new(),
        };
        session.reset(seed);
        session
    }

    /// Start a game seeded from `source`.
    pub fn from_source<S: SeedSource + ?Sized>(source: &mut S) -> Self {
        Self::new(source.next_seed())
    }

    /// Continue from an arbitrary board without placing starting tiles.
    pub fn with_board(board: Board, seed: Seed) -> Self {
        let phase = if is_terminal(&board) {
            Phase::Over
        } else {
            Phase::Playing
        };
        Self {
            seed,
            rng: TileRng::new(seed),
            board,
            score: 0,
            turn: 0,
            phase,
            pending_events: Vec::new(),
        }
    }

    /// Throw the current game away and start a new one with `seed`.
    pub fn reset(&mut self, seed: Seed) {
        self.seed = seed;
        self.rng = TileRng::new(seed);
        self.board.clear();
        self.score = 0;
        self.turn = 0;
        self.phase = Phase::Playing;
        self.pending_events.clear();

        for _ in 0..STARTING_TILES {
            self.spawn();
        }
        debug!(%seed, board = ?self.board, "session started");
    }

    /// Resolve one direction.
    ///
    /// Compaction, merge and the closing compaction run strictly in that
    /// order. A tile spawns only if a tile moved or merged; the score grows
    /// by the merge delta either way. Does nothing once the session is over.
    pub fn handle_tiles(&mut self, direction: Direction) -> TurnResult {
        if self.phase == Phase::Over {
            return TurnResult {
                direction,
                moves: 0,
                score_delta: 0,
                spawned: None,
                game_over: true,
            };
        }

        self.turn += 1;

        let mut moves = compact(&mut self.board, direction);
        let score_delta = merge(&mut self.board, direction);
        moves += compact(&mut self.board, direction);

        let changed = moves != 0 || score_delta != 0;
        let spawned = if changed { self.spawn() } else { None };

        self.score = self.score.saturating_add(score_delta);

        self.pending_events.push(GameEvent::turn_resolved(
            self.turn,
            direction,
            changed,
            score_delta,
            self.score,
        ));

        let game_over = is_terminal(&self.board);
        if game_over {
            self.phase = Phase::Over;
            self.pending_events.push(GameEvent::game_over(
                self.turn,
                self.score,
                self.board.highest_rank(),
            ));
        }

        debug!(
            turn = self.turn,
            %direction,
            moves,
            score_delta,
            score = self.score,
            board = ?self.board,
            "turn resolved"
        );

        TurnResult {
            direction,
            moves,
            score_delta,
            spawned,
            game_over,
        }
    }

    fn spawn(&mut self) -> Option<SpawnedTile> {
        match spawn_tile(&mut self.board, &mut self.rng) {
            Ok(tile) => {
                self.pending_events.push(GameEvent::tile_spawned(self.turn, tile));
                Some(tile)
            }
            Err(err) => {
                // Only reachable if a changed board had no empty cell.
                error!(turn = self.turn, board = ?self.board, %err, "spawn skipped");
                None
            }
        }
    }

    /// True if no legal move remains.
    pub fn is_terminal(&self) -> bool {
        is_terminal(&self.board)
    }

    /// True once a turn has ended on a terminal board.
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Rank at `(row, col)`, for display.
    pub fn rank_at(&self, row: usize, col: usize) -> Rank {
        self.board.rank_at(row, col)
    }

    /// Accumulated score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Directions resolved so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Seed the session started with.
    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// Current generator registers.
    pub fn rng_state(&self) -> Seed {
        self.rng.state()
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.turn, [self.seed.seed, self.seed.seed_a], |hasher| {
            for rank in self.board.ranks() {
                hasher.update_u8(rank);
            }
            hasher.update_u32(self.score);

            let rng = self.rng.state();
            hasher.update_u8(rng.seed);
            hasher.update_u8(rng.seed_a);

            hasher.update_bool(self.phase == Phase::Over);
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
