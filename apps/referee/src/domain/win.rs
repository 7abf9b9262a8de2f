//! Four-in-a-row detection.

use crate::domain::board::{Board, Side, COLS, ROWS};

pub const RUN_LENGTH: usize = 4;

/// (row step, column step) for each line direction: horizontal, vertical,
/// diagonal down-right, diagonal down-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// True when `side` holds four consecutive cells along any line.
pub fn has_four(board: &Board, side: Side) -> bool {
    (0..ROWS).any(|row| {
        (0..COLS).any(|column| {
            DIRECTIONS
                .iter()
                .any(|&(dr, dc)| window_matches(board, side, row, column, dr, dc))
        })
    })
}

/// The side whose marks complete a run, checking Side One first.
pub fn winner(board: &Board) -> Option<Side> {
    [Side::One, Side::Two]
        .into_iter()
        .find(|&side| has_four(board, side))
}

fn window_matches(
    board: &Board,
    side: Side,
    row: usize,
    column: usize,
    dr: isize,
    dc: isize,
) -> bool {
    (0..RUN_LENGTH as isize).all(|step| {
        let r = row as isize + dr * step;
        let c = column as isize + dc * step;
        r >= 0
            && c >= 0
            && (r as usize) < ROWS
            && (c as usize) < COLS
            && board.cell(r as usize, c as usize) == Some(side)
    })
}
