use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;
use uuid::Uuid;

use super::{BotEntry, LeagueError, LeagueStore};
use crate::domain::{apply_outcome, MatchOutcome, RatingChange, Side, DEFAULT_RATING};
use crate::record::MatchRecord;
use crate::transport::AgentEndpoint;

#[derive(Debug, Default)]
struct LeagueState {
    bots: HashMap<Uuid, BotEntry>,
    /// Newest at the front.
    matches: VecDeque<MatchRecord>,
}

/// Process-local league store. One lock guards bots and matches together, so a
/// result is applied to both participants or not at all.
#[derive(Debug, Default)]
pub struct InMemoryLeague {
    state: Mutex<LeagueState>,
}

impl InMemoryLeague {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LeagueStore for InMemoryLeague {
    fn register(&self, name: &str, endpoint: AgentEndpoint) -> BotEntry {
        let entry = BotEntry {
            id: Uuid::new_v4(),
            name: name.to_string(),
            endpoint,
            rating: DEFAULT_RATING,
            wins: 0,
            losses: 0,
        };
        self.state.lock().bots.insert(entry.id, entry.clone());
        entry
    }

    fn bot(&self, id: Uuid) -> Option<BotEntry> {
        self.state.lock().bots.get(&id).cloned()
    }

    fn standings(&self) -> Vec<BotEntry> {
        let mut bots: Vec<BotEntry> = self.state.lock().bots.values().cloned().collect();
        bots.sort_by(|a, b| b.rating.cmp(&a.rating).then_with(|| a.name.cmp(&b.name)));
        bots
    }

    fn recent_matches(&self, limit: usize) -> Vec<MatchRecord> {
        self.state
            .lock()
            .matches
            .iter()
            .take(limit)
            .cloned()
            .collect()
    }

    fn record_result(
        &self,
        record: MatchRecord,
        side1: Uuid,
        side2: Uuid,
        outcome: &MatchOutcome,
    ) -> Result<RatingChange, LeagueError> {
        if side1 == side2 {
            return Err(LeagueError::SameBot);
        }
        let mut state = self.state.lock();
        let rating1 = state
            .bots
            .get(&side1)
            .map(|b| b.rating)
            .ok_or(LeagueError::UnknownBot(side1))?;
        let rating2 = state
            .bots
            .get(&side2)
            .map(|b| b.rating)
            .ok_or(LeagueError::UnknownBot(side2))?;

        let change = apply_outcome(rating1, rating2, outcome);
        let winner = outcome.winner();
        for (id, side, rating) in [(side1, Side::One, change.side1), (side2, Side::Two, change.side2)] {
            if let Some(bot) = state.bots.get_mut(&id) {
                bot.rating = rating;
                match winner {
                    Some(w) if w == side => bot.wins += 1,
                    Some(_) => bot.losses += 1,
                    None => {}
                }
            }
        }
        state.matches.push_front(record);
        Ok(change)
    }
}
