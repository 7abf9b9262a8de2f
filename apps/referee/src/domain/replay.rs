//! Rebuilding and rendering boards from move logs.
//!
//! A finished match's move log replayed here, alternating from Side One,
//! reproduces the referee's final board exactly.

use thiserror::Error;

use crate::domain::board::{Board, Side, COLS, ROWS};
use crate::domain::win::has_four;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("illegal column {column} at ply {ply}")]
    IllegalColumn { ply: usize, column: u8 },
    #[error("move at ply {ply} comes after {winner} already won")]
    MoveAfterWin { ply: usize, winner: Side },
}

pub fn replay(moves: &[u8]) -> Result<Board, ReplayError> {
    let mut board = Board::new();
    let mut decided: Option<Side> = None;
    for (ply, &column) in moves.iter().enumerate() {
        if let Some(winner) = decided {
            return Err(ReplayError::MoveAfterWin { ply, winner });
        }
        let side = Side::for_ply(ply);
        if !board.is_legal(usize::from(column)) {
            return Err(ReplayError::IllegalColumn { ply, column });
        }
        board.drop_mark(usize::from(column), side);
        if has_four(&board, side) {
            decided = Some(side);
        }
    }
    Ok(board)
}

/// Six text rows (`.` empty, `X` Side One, `O` Side Two) and a column index line.
pub fn render(board: &Board) -> String {
    let mut out = String::with_capacity((COLS * 2 + 1) * (ROWS + 1));
    for row in 0..ROWS {
        let line: Vec<&str> = (0..COLS)
            .map(|column| match board.cell(row, column) {
                None => ".",
                Some(Side::One) => "X",
                Some(Side::Two) => "O",
            })
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    let footer: Vec<String> = (0..COLS).map(|c| c.to_string()).collect();
    out.push_str(&footer.join(" "));
    out.push('\n');
    out
}
