use std::env;
use std::time::Duration;

use crate::domain::CELLS;
use crate::error::RefereeError;

pub const DEFAULT_MOVE_TIMEOUT: Duration = Duration::from_millis(2000);
pub const DEFAULT_WATCHDOG_GRACE: Duration = Duration::from_millis(250);

/// Timing and budget knobs for one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefereeConfig {
    /// Deadline each transport enforces on a single move request.
    pub move_timeout: Duration,
    /// Extra slack the referee's own watchdog allows on top of `move_timeout`.
    pub watchdog_grace: Duration,
    /// Upper bound on plies; never more than the number of cells.
    pub max_plies: usize,
}

impl Default for RefereeConfig {
    fn default() -> Self {
        Self {
            move_timeout: DEFAULT_MOVE_TIMEOUT,
            watchdog_grace: DEFAULT_WATCHDOG_GRACE,
            max_plies: CELLS,
        }
    }
}

impl RefereeConfig {
    /// Defaults overridden by `REFEREE_MOVE_TIMEOUT_MS` and
    /// `REFEREE_WATCHDOG_GRACE_MS` when set.
    pub fn from_env() -> Result<Self, RefereeError> {
        let mut config = Self::default();
        if let Some(ms) = millis_var("REFEREE_MOVE_TIMEOUT_MS")? {
            config.move_timeout = ms;
        }
        if let Some(ms) = millis_var("REFEREE_WATCHDOG_GRACE_MS")? {
            config.watchdog_grace = ms;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_move_timeout(mut self, timeout: Duration) -> Self {
        self.move_timeout = timeout;
        self
    }

    /// Hard bound the referee places on a single move request.
    pub fn watchdog(&self) -> Duration {
        self.move_timeout + self.watchdog_grace
    }

    pub fn validate(&self) -> Result<(), RefereeError> {
        if self.move_timeout.is_zero() {
            return Err(RefereeError::config("move timeout must be greater than zero"));
        }
        if self.max_plies == 0 || self.max_plies > CELLS {
            return Err(RefereeError::config(format!(
                "max plies must be between 1 and {CELLS}, got {}",
                self.max_plies
            )));
        }
        Ok(())
    }
}

fn millis_var(name: &str) -> Result<Option<Duration>, RefereeError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(|ms| Some(Duration::from_millis(ms)))
            .map_err(|_| {
                RefereeError::config(format!(
                    "Environment variable '{name}' must be a whole number of milliseconds, got '{raw}'"
                ))
            }),
        Err(_) => Ok(None),
    }
}
