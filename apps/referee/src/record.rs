//! Durable match record handed to storage and replay collaborators.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::Side;
use crate::referee::MatchReport;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: Uuid,
    pub participant1: String,
    pub participant2: String,
    /// Winning participant; `None` for a draw.
    pub winner: Option<String>,
    /// Columns in play order; replays to the final board from an empty one.
    pub move_log: Vec<u8>,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl MatchRecord {
    pub fn from_report(
        participant1: impl Into<String>,
        participant2: impl Into<String>,
        report: &MatchReport,
    ) -> Self {
        let participant1 = participant1.into();
        let participant2 = participant2.into();
        let winner = report.outcome.winner().map(|side| match side {
            Side::One => participant1.clone(),
            Side::Two => participant2.clone(),
        });
        Self {
            id: Uuid::new_v4(),
            participant1,
            participant2,
            winner,
            move_log: report.moves.clone(),
            timestamp: OffsetDateTime::now_utc(),
        }
    }
}
