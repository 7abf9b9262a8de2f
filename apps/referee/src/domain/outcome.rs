use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::board::Side;

/// Why a side lost without being out-played on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForfeitReason {
    /// The agent did not answer within its deadline.
    Timeout,
    /// The agent was unreachable, exited, or broke its pipe.
    Crash,
    /// The agent answered with something that is not a column.
    ProtocolError,
    /// The agent chose a column that is off the board or already full.
    IllegalMove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinReason {
    Connected,
    Forfeit(ForfeitReason),
}

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum MatchOutcome {
    Win { winner: Side, reason: WinReason },
    Draw,
}

impl MatchOutcome {
    pub fn connected(winner: Side) -> Self {
        Self::Win {
            winner,
            reason: WinReason::Connected,
        }
    }

    /// The opponent of `offender` wins.
    pub fn forfeit(offender: Side, reason: ForfeitReason) -> Self {
        Self::Win {
            winner: offender.other(),
            reason: WinReason::Forfeit(reason),
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self {
            Self::Win { winner, .. } => Some(*winner),
            Self::Draw => None,
        }
    }

    pub fn is_forfeit(&self) -> bool {
        matches!(
            self,
            Self::Win {
                reason: WinReason::Forfeit(_),
                ..
            }
        )
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Win {
                winner,
                reason: WinReason::Connected,
            } => write!(f, "{winner} wins by connecting four"),
            Self::Win {
                winner,
                reason: WinReason::Forfeit(reason),
            } => write!(f, "{winner} wins by forfeit ({reason:?})"),
            Self::Draw => write!(f, "draw"),
        }
    }
}
