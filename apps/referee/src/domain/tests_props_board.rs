//! Property tests for board mechanics and the replay contract (pure domain).
//!
//! Properties tested:
//! - Replaying a legal log reproduces the incrementally built board
//! - Every column obeys gravity (no gaps under a mark)
//! - A completed run is only ever reported for the side that made the last move

use proptest::prelude::*;

use crate::domain::board::{Board, Side, COLS, ROWS};
use crate::domain::replay::replay;
use crate::domain::test_gens::{legal_game, proptest_config};
use crate::domain::win::{has_four, winner};

proptest! {
    #![proptest_config(proptest_config())]

    /// Property: replay reproduces the board built move by move
    #[test]
    fn prop_replay_matches_incremental_board(moves in legal_game()) {
        let mut board = Board::new();
        for (ply, &column) in moves.iter().enumerate() {
            board.drop_mark(usize::from(column), Side::for_ply(ply));
        }
        let replayed = replay(&moves);
        prop_assert_eq!(replayed, Ok(board));
        prop_assert_eq!(board.mark_count(), moves.len());
    }

    /// Property: marks are contiguous from the bottom of each column
    #[test]
    fn prop_columns_have_no_gaps(moves in legal_game()) {
        let board = replay(&moves).unwrap();
        for column in 0..COLS {
            let mut seen_empty = false;
            for row in (0..ROWS).rev() {
                match board.cell(row, column) {
                    None => seen_empty = true,
                    Some(_) => prop_assert!(!seen_empty, "gap under row {} col {}", row, column),
                }
            }
        }
    }

    /// Property: if anyone has four, it is the side that moved last
    #[test]
    fn prop_only_last_mover_can_have_won(moves in legal_game()) {
        let board = replay(&moves).unwrap();
        if let Some(side) = winner(&board) {
            let last = Side::for_ply(moves.len() - 1);
            prop_assert_eq!(side, last);
            prop_assert!(!has_four(&board, last.other()));
        }
    }
}
