use crate::domain::{MatchOutcome, Side};

/// Where the referee loop stands within the current ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Step {
    /// Waiting on the agent for `side`.
    AwaitingMove(Side),
    /// Checking the raw answer against the pre-move board.
    Validating { side: Side, column: i64 },
    /// Dropping a validated mark.
    Applying { side: Side, column: usize },
    /// Looking for a run or a full board after `side` moved.
    CheckingTerminal(Side),
    Decided(MatchOutcome),
}

impl Step {
    pub(super) fn initial() -> Self {
        Step::AwaitingMove(Side::One)
    }
}
