//! Agent transports - how the referee asks an agent for its next column.
//!
//! This module provides:
//! - [`AgentTransport`]: the one seam the referee talks through
//! - [`HttpAgent`]: `POST {url}/move` with a JSON board
//! - [`PipeAgent`]: a child process fed one board line per turn
//! - [`ScriptedAgent`]: an in-process double for tests and demos
//! - [`connect`]: builds the right transport for an [`AgentEndpoint`]

mod http;
mod pipe;
mod scripted;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub use http::HttpAgent;
pub use pipe::PipeAgent;
pub use scripted::ScriptedAgent;

use crate::config::RefereeConfig;
use crate::domain::{Board, ForfeitReason, Side};
use crate::error::RefereeError;

/// Why an agent failed to produce a column.
///
/// The referee turns every one of these into a forfeit for the agent's side.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("agent did not answer within {0:?}")]
    Timeout(Duration),
    #[error("agent unavailable: {0}")]
    Crash(String),
    #[error("agent protocol error: {0}")]
    Protocol(String),
}

impl TransportError {
    pub fn crash(detail: impl Into<String>) -> Self {
        Self::Crash(detail.into())
    }

    pub fn protocol(detail: impl Into<String>) -> Self {
        Self::Protocol(detail.into())
    }

    pub fn forfeit_reason(&self) -> ForfeitReason {
        match self {
            Self::Timeout(_) => ForfeitReason::Timeout,
            Self::Crash(_) => ForfeitReason::Crash,
            Self::Protocol(_) => ForfeitReason::ProtocolError,
        }
    }
}

/// Trait for agent transports.
///
/// Implementations receive a snapshot of the board and the side to move and
/// return the column the agent picked. The raw integer is returned as-is;
/// range and fullness checks belong to the referee.
#[async_trait]
pub trait AgentTransport: Send {
    /// Ask the agent for a column, bounded by the transport's own deadline.
    async fn request_move(&mut self, board: &Board, side: Side) -> Result<i64, TransportError>;

    /// Release any resources held for the agent. Safe to call more than once.
    async fn shutdown(&mut self) {}

    /// Short label for logs.
    fn describe(&self) -> String;
}

/// How to launch a pipe agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub program: PathBuf,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

/// Where an agent lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentEndpoint {
    Http { base_url: String },
    Process(ProcessSpec),
}

impl AgentEndpoint {
    /// `http://` and `https://` strings are HTTP agents (trailing slashes
    /// dropped); anything else is a whitespace-separated command line.
    pub fn parse(raw: &str) -> Result<Self, RefereeError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(RefereeError::config("agent endpoint must not be empty"));
        }
        if raw.starts_with("http://") || raw.starts_with("https://") {
            return Ok(Self::Http {
                base_url: raw.trim_end_matches('/').to_string(),
            });
        }
        let mut parts = raw.split_whitespace();
        let program = parts
            .next()
            .map(PathBuf::from)
            .ok_or_else(|| RefereeError::config("agent command is missing a program"))?;
        Ok(Self::Process(ProcessSpec {
            program,
            args: parts.map(str::to_string).collect(),
            working_dir: None,
        }))
    }
}

impl fmt::Display for AgentEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http { base_url } => write!(f, "{base_url}"),
            Self::Process(spec) => {
                write!(f, "{}", spec.program.display())?;
                for arg in &spec.args {
                    write!(f, " {arg}")?;
                }
                Ok(())
            }
        }
    }
}

/// A participant as the caller knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentHandle {
    pub name: String,
    pub endpoint: AgentEndpoint,
}

impl AgentHandle {
    pub fn new(name: impl Into<String>, endpoint: AgentEndpoint) -> Self {
        Self {
            name: name.into(),
            endpoint,
        }
    }
}

/// Build the transport for `handle`.
///
/// An agent process that cannot be spawned is not a referee error: the agent
/// simply fails its first request and forfeits.
pub fn connect(
    handle: &AgentHandle,
    config: &RefereeConfig,
) -> Result<Box<dyn AgentTransport>, RefereeError> {
    match &handle.endpoint {
        AgentEndpoint::Http { base_url } => {
            Ok(Box::new(HttpAgent::new(base_url, config.move_timeout)?))
        }
        AgentEndpoint::Process(spec) => match PipeAgent::spawn(spec, config.move_timeout) {
            Ok(agent) => Ok(Box::new(agent)),
            Err(err) => {
                warn!(agent = %handle.name, error = %err, "Agent process failed to start");
                Ok(Box::new(ScriptedAgent::failing(&handle.name, err)))
            }
        },
    }
}
