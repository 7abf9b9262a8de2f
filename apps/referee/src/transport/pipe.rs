//! Subprocess agents: one board line in, one column line out.
//!
//! The child is spawned once per match and reused for every turn. It is killed
//! when a request overruns its deadline, when [`AgentTransport::shutdown`] runs,
//! and, through `kill_on_drop`, whenever the transport is dropped early.

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::{debug, warn};

use super::{AgentTransport, ProcessSpec, TransportError};
use crate::domain::{Board, Side};

/// Longest answer line accepted from an agent, newline included.
const MAX_LINE_BYTES: u64 = 64;

#[derive(Debug)]
pub struct PipeAgent {
    label: String,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stdout: Option<BufReader<ChildStdout>>,
    timeout: Duration,
}

impl PipeAgent {
    pub fn spawn(spec: &ProcessSpec, timeout: Duration) -> Result<Self, TransportError> {
        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &spec.working_dir {
            command.current_dir(dir);
        }

        let label = std::iter::once(spec.program.display().to_string())
            .chain(spec.args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");
        let mut child = command
            .spawn()
            .map_err(|e| TransportError::crash(format!("failed to spawn {label}: {e}")))?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take().map(BufReader::new);
        if let Some(stderr) = child.stderr.take() {
            let agent = label.clone();
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!(agent = %agent, "agent stderr: {line}");
                }
            });
        }
        debug!(agent = %label, pid = ?child.id(), "Agent process started");

        Ok(Self {
            label,
            child: Some(child),
            stdin,
            stdout,
            timeout,
        })
    }

    /// OS process id while the child is still owned by this transport.
    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().and_then(Child::id)
    }

    async fn exchange(&mut self, line: &str) -> Result<String, TransportError> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| TransportError::crash("agent input is closed"))?;
        stdin
            .write_all(line.as_bytes())
            .await
            .map_err(|e| TransportError::crash(format!("write to agent failed: {e}")))?;
        stdin
            .write_all(b"\n")
            .await
            .map_err(|e| TransportError::crash(format!("write to agent failed: {e}")))?;
        stdin
            .flush()
            .await
            .map_err(|e| TransportError::crash(format!("flush to agent failed: {e}")))?;

        let stdout = self
            .stdout
            .as_mut()
            .ok_or_else(|| TransportError::crash("agent output is closed"))?;
        let mut answer = String::new();
        let read = stdout
            .take(MAX_LINE_BYTES)
            .read_line(&mut answer)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidData => {
                    TransportError::protocol("agent answer is not valid UTF-8")
                }
                _ => TransportError::crash(format!("read from agent failed: {e}")),
            })?;
        if read == 0 {
            return Err(TransportError::crash("agent closed its output"));
        }
        if !answer.ends_with('\n') && read as u64 >= MAX_LINE_BYTES {
            return Err(TransportError::protocol("agent answer line is too long"));
        }
        Ok(answer)
    }

    async fn terminate(&mut self) {
        self.stdin = None;
        self.stdout = None;
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill().await {
                warn!(agent = %self.label, error = %e, "Failed to kill agent process");
            } else {
                debug!(agent = %self.label, "Agent process terminated");
            }
        }
    }
}

fn parse_column(answer: &str) -> Result<i64, TransportError> {
    let trimmed = answer.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| TransportError::protocol(format!("expected a column number, got {trimmed:?}")))
}

#[async_trait]
impl AgentTransport for PipeAgent {
    async fn request_move(&mut self, board: &Board, side: Side) -> Result<i64, TransportError> {
        let line = board.encode_line();
        debug!(agent = %self.label, side = side.number(), "Sending board to agent");
        let result = tokio::time::timeout(self.timeout, self.exchange(&line)).await;
        match result {
            Ok(Ok(answer)) => parse_column(&answer),
            Ok(Err(err)) => Err(err),
            Err(_) => {
                // Kill now so a hung child cannot outlive its turn.
                self.terminate().await;
                Err(TransportError::Timeout(self.timeout))
            }
        }
    }

    async fn shutdown(&mut self) {
        self.terminate().await;
    }

    fn describe(&self) -> String {
        format!("pipe:{}", self.label)
    }
}
