//! Connect Four board: a 6×7 grid filled bottom-up by column drops.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const CELLS: usize = ROWS * COLS;

/// One of the two competitors in a match.
///
/// Side One always moves first. On the wire a side is the integer 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub const fn number(self) -> u8 {
        match self {
            Side::One => 1,
            Side::Two => 2,
        }
    }

    pub const fn other(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    /// Side that moves at the given zero-based ply.
    pub const fn for_ply(ply: usize) -> Side {
        if ply % 2 == 0 {
            Side::One
        } else {
            Side::Two
        }
    }
}

impl From<Side> for u8 {
    fn from(side: Side) -> Self {
        side.number()
    }
}

impl TryFrom<u8> for Side {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Side::One),
            2 => Ok(Side::Two),
            other => Err(format!("side must be 1 or 2, got {other}")),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "side {}", self.number())
    }
}

/// The playing grid. Row 0 is the top row, row 5 the bottom.
///
/// `Board` is `Copy`, so the referee can hand transports a snapshot without
/// exposing its own state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [[Option<Side>; COLS]; ROWS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<Side> {
        self.cells
            .get(row)
            .and_then(|r| r.get(column))
            .copied()
            .flatten()
    }

    /// True when `column` is on the board and its top cell is still empty.
    pub fn is_legal(&self, column: usize) -> bool {
        column < COLS && self.cells[0][column].is_none()
    }

    /// Drop `side`'s mark into `column` and return the row it landed in.
    ///
    /// Callers must check [`Board::is_legal`] first. An illegal column leaves
    /// the board untouched and yields `None`.
    pub fn drop_mark(&mut self, column: usize, side: Side) -> Option<usize> {
        debug_assert!(self.is_legal(column), "drop into illegal column {column}");
        if !self.is_legal(column) {
            return None;
        }
        let row = (0..ROWS)
            .rev()
            .find(|&row| self.cells[row][column].is_none())?;
        self.cells[row][column] = Some(side);
        Some(row)
    }

    pub fn is_full(&self) -> bool {
        self.cells[0].iter().all(Option::is_some)
    }

    pub fn mark_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Grid as 0/1/2 digits, the layout HTTP agents receive.
    pub fn rows(&self) -> [[u8; COLS]; ROWS] {
        let mut out = [[0u8; COLS]; ROWS];
        for (row, cells) in self.cells.iter().enumerate() {
            for (column, cell) in cells.iter().enumerate() {
                out[row][column] = cell.map_or(0, Side::number);
            }
        }
        out
    }

    /// 42 digits, row-major from the top row, the line pipe agents receive.
    pub fn encode_line(&self) -> String {
        self.cells
            .iter()
            .flatten()
            .map(|cell| match cell {
                None => '0',
                Some(Side::One) => '1',
                Some(Side::Two) => '2',
            })
            .collect()
    }
}
