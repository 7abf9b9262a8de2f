//! The match referee: drives one game from empty board to a decided outcome.
//!
//! The loop is transport-agnostic. It asks the side to move for a column,
//! validates it against the board as it stood before the move, applies it,
//! and checks for a finished game. Agent failures of any kind end the match
//! as a forfeit; they never surface as errors.

mod state;

use serde::Serialize;
use tracing::{debug, info, warn};

use self::state::Step;
use crate::config::RefereeConfig;
use crate::domain::{has_four, Board, ForfeitReason, MatchOutcome, Side};
use crate::error::RefereeError;
use crate::transport::{self, AgentHandle, AgentTransport, TransportError};

/// Everything the referee hands back once a match is decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub outcome: MatchOutcome,
    /// Columns in play order, Side One first.
    pub moves: Vec<u8>,
    #[serde(skip)]
    pub board: Board,
}

#[derive(Debug, Clone, Default)]
pub struct Referee {
    config: RefereeConfig,
}

impl Referee {
    pub fn new(config: RefereeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RefereeConfig {
        &self.config
    }

    /// Play one match. `first` moves as Side One.
    ///
    /// Does not shut the transports down; whoever created them owns that.
    pub async fn play<'a>(
        &self,
        first: &'a mut dyn AgentTransport,
        second: &'a mut dyn AgentTransport,
    ) -> MatchReport {
        let mut board = Board::new();
        let mut moves: Vec<u8> = Vec::with_capacity(self.config.max_plies);
        let mut step = Step::initial();

        let outcome = loop {
            step = match step {
                Step::AwaitingMove(side) => {
                    if moves.len() >= self.config.max_plies {
                        debug!(plies = moves.len(), "Ply budget exhausted");
                        Step::Decided(MatchOutcome::Draw)
                    } else {
                        let agent = match side {
                            Side::One => &mut *first,
                            Side::Two => &mut *second,
                        };
                        match self.request(agent, board, side).await {
                            Ok(column) => Step::Validating { side, column },
                            Err(err) => {
                                warn!(
                                    %side,
                                    agent = %agent.describe(),
                                    ply = moves.len(),
                                    error = %err,
                                    "Agent failed to move; forfeit"
                                );
                                Step::Decided(MatchOutcome::forfeit(side, err.forfeit_reason()))
                            }
                        }
                    }
                }
                Step::Validating { side, column } => {
                    match usize::try_from(column).ok().filter(|&c| board.is_legal(c)) {
                        Some(column) => Step::Applying { side, column },
                        None => {
                            warn!(%side, column, ply = moves.len(), "Illegal move; forfeit");
                            Step::Decided(MatchOutcome::forfeit(side, ForfeitReason::IllegalMove))
                        }
                    }
                }
                Step::Applying { side, column } => {
                    let row = board.drop_mark(column, side);
                    // Validated against this very board, so the column fits in u8.
                    moves.push(column as u8);
                    debug!(%side, column, ?row, ply = moves.len(), "Move applied");
                    Step::CheckingTerminal(side)
                }
                Step::CheckingTerminal(side) => {
                    if has_four(&board, side) {
                        Step::Decided(MatchOutcome::connected(side))
                    } else if board.is_full() {
                        Step::Decided(MatchOutcome::Draw)
                    } else {
                        Step::AwaitingMove(side.other())
                    }
                }
                Step::Decided(outcome) => break outcome,
            };
        };

        info!(%outcome, plies = moves.len(), "Match decided");
        MatchReport {
            outcome,
            moves,
            board,
        }
    }

    /// One move request under the referee's own watchdog, so a transport that
    /// ignores its deadline still cannot stall the match.
    async fn request(
        &self,
        agent: &mut dyn AgentTransport,
        snapshot: Board,
        side: Side,
    ) -> Result<i64, TransportError> {
        let watchdog = self.config.watchdog();
        match tokio::time::timeout(watchdog, agent.request_move(&snapshot, side)).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout(watchdog)),
        }
    }
}

/// Run a full match between two agents.
///
/// Both transports are shut down before returning, whatever the outcome. If
/// the returned future is dropped mid-match, pipe agents are still killed by
/// their drop guard.
pub async fn run_match(
    agent1: &AgentHandle,
    agent2: &AgentHandle,
    config: &RefereeConfig,
) -> Result<MatchReport, RefereeError> {
    config.validate()?;
    let mut first = transport::connect(agent1, config)?;
    let mut second = transport::connect(agent2, config)?;
    info!(
        side1 = %agent1.name,
        side2 = %agent2.name,
        "Match starting"
    );

    let report = Referee::new(config.clone())
        .play(first.as_mut(), second.as_mut())
        .await;

    first.shutdown().await;
    second.shutdown().await;
    Ok(report)
}

/// Blocking form of [`run_match`] for callers without a runtime.
pub fn run_match_blocking(
    agent1: &AgentHandle,
    agent2: &AgentHandle,
    config: &RefereeConfig,
) -> Result<MatchReport, RefereeError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| RefereeError::runtime("failed to start match runtime", e))?;
    runtime.block_on(run_match(agent1, agent2, config))
}
