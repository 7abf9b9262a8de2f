//! In-process agent double.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;

use super::{AgentTransport, TransportError};
use crate::domain::{Board, Side};

/// Agent that answers from a script instead of a remote program.
///
/// Queued columns are played first; once the queue is empty the agent falls
/// back to its repeating column, its scripted failure, or a crash.
#[derive(Debug, Clone)]
pub struct ScriptedAgent {
    name: String,
    queue: VecDeque<i64>,
    repeat: Option<i64>,
    failure: Option<TransportError>,
    stall: Option<Duration>,
    seen: Vec<(Board, Side)>,
}

impl ScriptedAgent {
    fn blank(name: &str) -> Self {
        Self {
            name: name.to_string(),
            queue: VecDeque::new(),
            repeat: None,
            failure: None,
            stall: None,
            seen: Vec::new(),
        }
    }

    /// Plays `column` every turn.
    pub fn repeating(name: &str, column: i64) -> Self {
        Self {
            repeat: Some(column),
            ..Self::blank(name)
        }
    }

    /// Plays `columns` in order, then crashes.
    pub fn from_moves(name: &str, columns: impl IntoIterator<Item = i64>) -> Self {
        Self {
            queue: columns.into_iter().collect(),
            ..Self::blank(name)
        }
    }

    /// Fails every request with `error`.
    pub fn failing(name: &str, error: TransportError) -> Self {
        Self {
            failure: Some(error),
            ..Self::blank(name)
        }
    }

    /// Sleeps for `delay` before every answer.
    pub fn stalling(mut self, delay: Duration) -> Self {
        self.stall = Some(delay);
        self
    }

    /// Boards and sides this agent was asked about, in order.
    pub fn seen(&self) -> &[(Board, Side)] {
        &self.seen
    }
}

#[async_trait]
impl AgentTransport for ScriptedAgent {
    async fn request_move(&mut self, board: &Board, side: Side) -> Result<i64, TransportError> {
        self.seen.push((*board, side));
        if let Some(delay) = self.stall {
            tokio::time::sleep(delay).await;
        }
        if let Some(column) = self.queue.pop_front() {
            return Ok(column);
        }
        if let Some(column) = self.repeat {
            return Ok(column);
        }
        Err(self
            .failure
            .clone()
            .unwrap_or_else(|| TransportError::crash("script exhausted")))
    }

    fn describe(&self) -> String {
        format!("scripted:{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn queued_moves_then_crash() {
        let mut agent = ScriptedAgent::from_moves("a", [4, 2]);
        let board = Board::new();
        assert_eq!(agent.request_move(&board, Side::One).await, Ok(4));
        assert_eq!(agent.request_move(&board, Side::One).await, Ok(2));
        assert!(matches!(
            agent.request_move(&board, Side::One).await,
            Err(TransportError::Crash(_))
        ));
        assert_eq!(agent.seen().len(), 3);
    }

    #[tokio::test]
    async fn scripted_failure_is_returned() {
        let mut agent = ScriptedAgent::failing("b", TransportError::protocol("garbled"));
        let result = agent.request_move(&Board::new(), Side::Two).await;
        assert_eq!(result, Err(TransportError::protocol("garbled")));
        assert_eq!(agent.describe(), "scripted:b");
    }
}
