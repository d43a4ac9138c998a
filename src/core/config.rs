//! Session configuration.
//!
//! A `SessionConfig` is supplied once when a [`GameSession`] is created.
//! Every field has a default, so a partial JSON/TOML document deserialises
//! into a usable config.
//!
//! [`GameSession`]: crate::session::GameSession

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Default number of game-log entries retained.
pub const DEFAULT_LOG_CAPACITY: usize = 200;

/// Configuration for one game session.
///
/// ```
/// use fengsheng_core::core::SessionConfig;
///
/// let config = SessionConfig::new()
///     .with_log_capacity(50)
///     .record_mode();
///
/// assert!(config.validate().is_ok());
/// assert!(config.record_mode);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum number of game-log entries kept. Oldest entries drop first.
    pub log_capacity: usize,

    /// Replay playback: outbound intents are dropped instead of published.
    pub record_mode: bool,

    /// Derive absolute seat numbers from the first phase notification.
    pub auto_assign_seats: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            log_capacity: DEFAULT_LOG_CAPACITY,
            record_mode: false,
            auto_assign_seats: true,
        }
    }
}

impl SessionConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the game-log capacity.
    #[must_use]
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity;
        self
    }

    /// Enable replay playback.
    #[must_use]
    pub fn record_mode(mut self) -> Self {
        self.record_mode = true;
        self
    }

    /// Turn off automatic seat assignment.
    #[must_use]
    pub fn without_seat_assignment(mut self) -> Self {
        self.auto_assign_seats = false;
        self
    }

    /// Check the config for values the session cannot run with.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.log_capacity == 0 {
            return Err(GameError::InvalidConfig(
                "log_capacity must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
