//! Networked agents: one JSON request per move.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AgentTransport, TransportError};
use crate::domain::{Board, Side, COLS, ROWS};
use crate::error::RefereeError;

#[derive(Debug, Serialize)]
struct MoveRequest {
    board: [[u8; COLS]; ROWS],
    you_are: Side,
}

#[derive(Debug, Deserialize)]
struct MoveReply {
    column: Option<i64>,
}

/// Agent reached at `POST {base_url}/move`.
#[derive(Debug, Clone)]
pub struct HttpAgent {
    client: reqwest::Client,
    move_url: String,
    timeout: Duration,
}

impl HttpAgent {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RefereeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RefereeError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            move_url: format!("{}/move", base_url.trim_end_matches('/')),
            timeout,
        })
    }

    pub fn move_url(&self) -> &str {
        &self.move_url
    }

    fn classify(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else if err.is_decode() || err.is_body() {
            TransportError::protocol(err.to_string())
        } else {
            TransportError::crash(err.to_string())
        }
    }
}

#[async_trait]
impl AgentTransport for HttpAgent {
    async fn request_move(&mut self, board: &Board, side: Side) -> Result<i64, TransportError> {
        let payload = MoveRequest {
            board: board.rows(),
            you_are: side,
        };
        let response = self
            .client
            .post(&self.move_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::protocol(format!(
                "agent answered HTTP {status}"
            )));
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        let reply: MoveReply = serde_json::from_slice(&body)
            .map_err(|e| TransportError::protocol(format!("malformed move reply: {e}")))?;
        debug!(url = %self.move_url, column = ?reply.column, "Agent replied");
        reply
            .column
            .ok_or_else(|| TransportError::protocol("move reply has no column"))
    }

    fn describe(&self) -> String {
        format!("http:{}", self.move_url)
    }
}
