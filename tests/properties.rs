//! Property-based tests for the board engine and session.

use proptest::prelude::*;

use tile_merge::game::labels::tile_value;
use tile_merge::game::moves::{compact, merge};
use tile_merge::game::spawn::spawn_tile;
use tile_merge::game::terminal::is_terminal;
use tile_merge::{verify_replay, Board, Direction, InputLog, Seed, Session, TileRng};

/// Strategy: a board with ranks 0-12, low enough that no merge saturates.
fn board_strategy() -> impl Strategy<Value = Board> {
    prop::array::uniform4(prop::array::uniform4(0..=12u8))
        .prop_map(|rows| Board::from_rows(rows).unwrap())
}

/// Strategy: a board with every cell occupied.
fn full_board_strategy() -> impl Strategy<Value = Board> {
    prop::array::uniform4(prop::array::uniform4(1..=12u8))
        .prop_map(|rows| Board::from_rows(rows).unwrap())
}

fn seed_strategy() -> impl Strategy<Value = Seed> {
    (any::<u8>(), any::<u8>()).prop_map(|(seed, seed_a)| Seed::new(seed, seed_a))
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn directions_strategy() -> impl Strategy<Value = Vec<Direction>> {
    prop::collection::vec(direction_strategy(), 0..64)
}

fn value_sum(board: &Board) -> u64 {
    board.ranks().map(|rank| tile_value(rank) as u64).sum()
}

/// Compact, merge, compact. Returns (moves, score delta).
fn slide(board: &mut Board, direction: Direction) -> (u32, u32) {
    let mut moves = compact(board, direction);
    let delta = merge(board, direction);
    moves += compact(board, direction);
    (moves, delta)
}

proptest! {
    // 1. A spawn fills exactly one empty cell with a "2" or "4" and draws twice
    #[test]
    fn spawn_fills_one_empty_cell(board in board_strategy(), seed in seed_strategy()) {
        prop_assume!(!board.is_full());

        let mut after = board;
        let mut rng = TileRng::new(seed);
        let tile = spawn_tile(&mut after, &mut rng).unwrap();

        prop_assert_eq!(after.count_empty() + 1, board.count_empty());
        prop_assert_eq!(board.rank_at(tile.row as usize, tile.col as usize), 0);
        prop_assert!(tile.rank == 1 || tile.rank == 2, "rank={}", tile.rank);

        let changed = Board::positions()
            .filter(|&(row, col)| after.rank_at(row, col) != board.rank_at(row, col))
            .count();
        prop_assert_eq!(changed, 1);
        prop_assert_eq!(rng.state().seed_a, seed.seed_a.wrapping_add(2));
    }

    // 2. Sliding never creates or destroys tile value
    #[test]
    fn slide_conserves_value(board in board_strategy(), direction in direction_strategy()) {
        let mut after = board;
        slide(&mut after, direction);
        prop_assert_eq!(value_sum(&after), value_sum(&board));
    }

    // 3. A slid board is already compact
    #[test]
    fn slide_leaves_board_settled(board in board_strategy(), direction in direction_strategy()) {
        let mut after = board;
        slide(&mut after, direction);
        let settled = after;
        prop_assert_eq!(compact(&mut after, direction), 0);
        prop_assert_eq!(after, settled);
    }

    // 4. The score gain is even and at most the board's total value
    #[test]
    fn merge_delta_bounded(board in board_strategy(), direction in direction_strategy()) {
        let mut after = board;
        let (_, delta) = slide(&mut after, direction);
        prop_assert_eq!(delta % 2, 0);
        prop_assert!(delta as u64 <= value_sum(&board));
        if delta == 0 {
            prop_assert_eq!(after.count_occupied(), board.count_occupied());
        } else {
            prop_assert!(after.count_occupied() < board.count_occupied());
        }
    }

    // 5. Each merge empties exactly one cell and promotes exactly one
    #[test]
    fn merge_removes_one_tile_per_merge(
        board in board_strategy(),
        direction in direction_strategy(),
    ) {
        let mut after = board;
        let delta = merge(&mut after, direction);

        let promoted: Vec<_> = Board::positions()
            .filter(|&(row, col)| after.rank_at(row, col) > board.rank_at(row, col))
            .collect();
        for &(row, col) in &promoted {
            prop_assert_eq!(after.rank_at(row, col), board.rank_at(row, col) + 1);
        }
        prop_assert_eq!(
            (board.count_occupied() - after.count_occupied()) as usize,
            promoted.len()
        );

        let expected: u32 = promoted
            .iter()
            .map(|&(row, col)| tile_value(after.rank_at(row, col)))
            .sum();
        prop_assert_eq!(delta, expected);
    }

    // 6. Terminal exactly when no direction changes anything
    #[test]
    fn terminal_iff_no_direction_changes(
        board in prop_oneof![board_strategy(), full_board_strategy()],
    ) {
        // An empty board cannot move either, but it is not terminal.
        prop_assume!(board.count_occupied() > 0);
        let stuck = Direction::ALL.iter().all(|&direction| {
            let mut trial = board;
            slide(&mut trial, direction) == (0, 0) && trial == board
        });
        prop_assert_eq!(is_terminal(&board), stuck);
    }

    // 7. Score never decreases and the turn counter follows the inputs
    #[test]
    fn score_monotonic(seed in seed_strategy(), directions in directions_strategy()) {
        let mut session = Session::new(seed);
        let mut previous = session.score();
        for direction in directions {
            let was_over = session.is_over();
            let turn = session.turn();
            let result = session.handle_tiles(direction);

            prop_assert!(session.score() >= previous);
            prop_assert_eq!(session.score(), previous + result.score_delta);
            prop_assert_eq!(session.turn(), if was_over { turn } else { turn + 1 });
            previous = session.score();
        }
    }

    // 8. Same seed and same directions give the same session
    #[test]
    fn session_deterministic(seed in seed_strategy(), directions in directions_strategy()) {
        let mut a = Session::new(seed);
        let mut b = Session::new(seed);
        for &direction in &directions {
            prop_assert_eq!(a.handle_tiles(direction), b.handle_tiles(direction));
        }
        prop_assert_eq!(a.board(), b.board());
        prop_assert_eq!(a.compute_hash(), b.compute_hash());

        let log: InputLog = directions.iter().copied().take(a.turn() as usize).collect();
        let replayed = verify_replay(seed, &log, &a.compute_hash());
        prop_assert!(replayed.is_ok(), "{:?}", replayed.err());
    }
}
