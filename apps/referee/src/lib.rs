#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Connect Four match referee.
//!
//! Pits two untrusted agents against each other over HTTP or a process pipe,
//! enforces rules and deadlines, and reports a replayable outcome.

pub mod config;
pub mod domain;
pub mod error;
pub mod league;
pub mod record;
pub mod referee;
pub mod transport;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::RefereeConfig;
pub use domain::{Board, ForfeitReason, MatchOutcome, RatingChange, Side, WinReason};
pub use error::RefereeError;
pub use league::{fight, fight_random_pair, BotEntry, InMemoryLeague, LeagueError, LeagueStore};
pub use record::MatchRecord;
pub use referee::{run_match, run_match_blocking, MatchReport, Referee};
pub use transport::{
    AgentEndpoint, AgentHandle, AgentTransport, HttpAgent, PipeAgent, ProcessSpec, ScriptedAgent,
    TransportError,
};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
