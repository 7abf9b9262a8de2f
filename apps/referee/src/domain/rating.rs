//! Elo rating updates after a decided match.
//!
//! Computation is pure; persisting the new ratings is the caller's job.

use serde::Serialize;

use crate::domain::board::Side;
use crate::domain::outcome::MatchOutcome;

pub const DEFAULT_RATING: i32 = 1200;
pub const K_FACTOR: f64 = 32.0;

/// Probability that a player rated `rating` beats one rated `opponent`.
pub fn expected_score(rating: i32, opponent: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf((f64::from(opponent) - f64::from(rating)) / 400.0))
}

/// Points the winner gains and the loser drops.
pub fn elo_delta(winner: i32, loser: i32) -> i32 {
    let delta = K_FACTOR * (1.0 - expected_score(winner, loser));
    // Bounded by K_FACTOR, so the cast cannot truncate.
    delta.round_ties_even() as i32
}

/// Ratings of both participants after a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingChange {
    pub side1: i32,
    pub side2: i32,
    pub delta: i32,
}

/// New ratings clamp at the `i32` bounds.
pub fn apply_outcome(side1: i32, side2: i32, outcome: &MatchOutcome) -> RatingChange {
    match outcome.winner() {
        Some(Side::One) => {
            let delta = elo_delta(side1, side2);
            RatingChange {
                side1: side1.saturating_add(delta),
                side2: side2.saturating_sub(delta),
                delta,
            }
        }
        Some(Side::Two) => {
            let delta = elo_delta(side2, side1);
            RatingChange {
                side1: side1.saturating_sub(delta),
                side2: side2.saturating_add(delta),
                delta,
            }
        }
        None => RatingChange {
            side1,
            side2,
            delta: 0,
        },
    }
}
