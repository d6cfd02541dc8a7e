//! Engine tuning.

use ridepark_core::{DEFAULT_HISTORY_BOUND, EngineError};
use serde::{Deserialize, Serialize};

/// Tunable limits for a [`Park`](crate::Park).
///
/// # Examples
/// ```
/// use ridepark_runtime::ParkConfig;
///
/// let config = ParkConfig {
///     suggestion_limit: 3,
///     ..ParkConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// assert!(ParkConfig { cycle_minutes: 0, ..config }.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParkConfig {
    /// Minutes per dispatch cycle: riding plus boarding.
    pub cycle_minutes: u32,
    /// Number of suggestions returned per visitor.
    pub suggestion_limit: usize,
    /// Number of rides listed in the statistics leaderboard.
    pub top_rides: usize,
    /// History entries retained per visitor.
    pub history_bound: usize,
    /// Most recent rides considered when flagging a suggestion as recently
    /// ridden.
    pub recent_window: usize,
}

impl ParkConfig {
    /// Validate the configuration and return a copy.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInput`] naming the first field that is
    /// zero.
    pub fn validate(self) -> Result<Self, EngineError> {
        let checks: [(&'static str, bool); 5] = [
            ("cycle_minutes", self.cycle_minutes > 0),
            ("suggestion_limit", self.suggestion_limit > 0),
            ("top_rides", self.top_rides > 0),
            ("history_bound", self.history_bound > 0),
            ("recent_window", self.recent_window > 0),
        ];
        match checks.into_iter().find(|(_, ok)| !ok) {
            Some((field, _)) => Err(EngineError::invalid_input(field, "must be positive")),
            None => Ok(self),
        }
    }
}

impl Default for ParkConfig {
    fn default() -> Self {
        Self {
            // Five minutes of riding plus two of boarding.
            cycle_minutes: 7,
            suggestion_limit: 5,
            top_rides: 5,
            history_bound: DEFAULT_HISTORY_BOUND,
            recent_window: 3,
        }
    }
}
