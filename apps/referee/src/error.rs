use thiserror::Error;

/// Errors that escape the referee.
///
/// Agent misbehavior never shows up here; it is folded into the match outcome
/// as a forfeit. These variants cover problems on the referee's own side.
#[derive(Error, Debug)]
pub enum RefereeError {
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Runtime error: {detail}")]
    Runtime {
        detail: String,
        #[source]
        source: std::io::Error,
    },
}

impl RefereeError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn runtime(detail: impl Into<String>, source: std::io::Error) -> Self {
        Self::Runtime {
            detail: detail.into(),
            source,
        }
    }
}
