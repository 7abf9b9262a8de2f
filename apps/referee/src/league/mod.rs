//! League bookkeeping around the referee.
//!
//! The referee itself never persists anything. This module is the caller-side
//! collaborator: it keeps registered bots, their ratings and records, and the
//! history of recorded matches, and it applies each match result as one
//! logical transaction.

mod memory;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

pub use memory::InMemoryLeague;

use crate::config::RefereeConfig;
use crate::domain::{MatchOutcome, RatingChange};
use crate::error::RefereeError;
use crate::record::MatchRecord;
use crate::referee::run_match;
use crate::transport::{AgentEndpoint, AgentHandle};

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("need at least 2 bots to run a match, have {0}")]
    NotEnoughBots(usize),
    #[error("unknown bot {0}")]
    UnknownBot(Uuid),
    #[error("a bot cannot play itself")]
    SameBot,
    #[error(transparent)]
    Referee(#[from] RefereeError),
}

/// A registered bot and its standing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotEntry {
    pub id: Uuid,
    pub name: String,
    pub endpoint: AgentEndpoint,
    pub rating: i32,
    pub wins: u32,
    pub losses: u32,
}

impl BotEntry {
    pub fn handle(&self) -> AgentHandle {
        AgentHandle::new(self.name.clone(), self.endpoint.clone())
    }
}

/// Storage for bots and match results.
pub trait LeagueStore: Send + Sync {
    fn register(&self, name: &str, endpoint: AgentEndpoint) -> BotEntry;

    fn bot(&self, id: Uuid) -> Option<BotEntry>;

    /// All bots, highest rating first.
    fn standings(&self) -> Vec<BotEntry>;

    /// Most recent records first.
    fn recent_matches(&self, limit: usize) -> Vec<MatchRecord>;

    /// Store `record` and apply the rating and win/loss changes for both
    /// participants atomically.
    fn record_result(
        &self,
        record: MatchRecord,
        side1: Uuid,
        side2: Uuid,
        outcome: &MatchOutcome,
    ) -> Result<RatingChange, LeagueError>;
}

/// What one league fight produced.
#[derive(Debug, Clone, Serialize)]
pub struct FightSummary {
    pub record: MatchRecord,
    pub outcome: MatchOutcome,
    pub change: RatingChange,
}

/// Pick two distinct bots at random, play them, and record the result.
pub async fn fight_random_pair<S, R>(
    store: &S,
    config: &RefereeConfig,
    rng: &mut R,
) -> Result<FightSummary, LeagueError>
where
    S: LeagueStore + ?Sized,
    R: Rng + ?Sized,
{
    let bots = store.standings();
    if bots.len() < 2 {
        return Err(LeagueError::NotEnoughBots(bots.len()));
    }
    let picks = rand::seq::index::sample(rng, bots.len(), 2);
    let side1 = &bots[picks.index(0)];
    let side2 = &bots[picks.index(1)];
    fight(store, config, side1, side2).await
}

/// Play `side1` against `side2` and record the result.
pub async fn fight<S>(
    store: &S,
    config: &RefereeConfig,
    side1: &BotEntry,
    side2: &BotEntry,
) -> Result<FightSummary, LeagueError>
where
    S: LeagueStore + ?Sized,
{
    if side1.id == side2.id {
        return Err(LeagueError::SameBot);
    }
    let report = run_match(&side1.handle(), &side2.handle(), config).await?;
    let record = MatchRecord::from_report(side1.name.clone(), side2.name.clone(), &report);
    let change = store.record_result(record.clone(), side1.id, side2.id, &report.outcome)?;
    info!(
        match_id = %record.id,
        side1 = %side1.name,
        side2 = %side2.name,
        outcome = %report.outcome,
        delta = change.delta,
        "League match recorded"
    );
    Ok(FightSummary {
        record,
        outcome: report.outcome,
        change,
    })
}
