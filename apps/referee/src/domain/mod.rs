//! Domain layer: pure Connect Four rules, outcomes and ratings.

pub mod board;
pub mod outcome;
pub mod rating;
pub mod replay;
pub mod win;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_props_board;

// Re-exports for ergonomics
pub use board::{Board, Side, CELLS, COLS, ROWS};
pub use outcome::{ForfeitReason, MatchOutcome, WinReason};
pub use rating::{apply_outcome, elo_delta, expected_score, RatingChange, DEFAULT_RATING};
pub use replay::{render, replay, ReplayError};
pub use win::{has_four, winner};
