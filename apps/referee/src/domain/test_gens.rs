//! Proptest generators for boards and move logs.

use proptest::prelude::*;

use crate::domain::board::{Board, Side, COLS};
use crate::domain::win::has_four;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(64)
        .max(1);
    ProptestConfig {
        failure_persistence: None,
        cases,
        ..ProptestConfig::default()
    }
}

/// A game played from raw column preferences: each preference is mapped onto
/// a legal column, and play stops at the first four-in-a-row or a full board.
pub fn legal_game() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0..COLS, 0..=60).prop_map(|prefs| {
        let mut board = Board::new();
        let mut moves = Vec::new();
        for pref in prefs {
            if board.is_full() {
                break;
            }
            let side = Side::for_ply(moves.len());
            // Valid by construction: rotate until a column with room is found.
            let Some(column) = (0..COLS)
                .map(|offset| (pref + offset) % COLS)
                .find(|&c| board.is_legal(c))
            else {
                break;
            };
            board.drop_mark(column, side);
            moves.push(column as u8);
            if has_four(&board, side) {
                break;
            }
        }
        moves
    })
}
