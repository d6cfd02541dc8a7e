//! Tunable weights for recommendation and satisfaction scoring.
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::ScoreWeightsError;

/// Smallest accepted ratio of the thrill-match weight to the wait weight.
pub const MIN_WEIGHT_RATIO: f32 = 10.0;

/// Weights for the recommendation priority.
///
/// `priority = thrill_match * thrill_match_weight + min((max_wait - wait) *
/// wait_time_weight, WAIT_BONUS_SHARE * thrill_match_weight)`. The wait bonus
/// stays below one thrill-match point, so a better match always outranks a
/// shorter queue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Multiplier applied to the `0..=10` thrill match.
    pub thrill_match: f32,
    /// Multiplier applied to each minute saved against the longest wait.
    pub wait_time: f32,
}

impl ScoreWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`ScoreWeightsError`] when a weight is not finite or is
    /// negative, when the thrill-match weight is zero, or when the wait
    /// weight exceeds the thrill-match weight divided by
    /// [`MIN_WEIGHT_RATIO`].
    #[expect(
        clippy::float_arithmetic,
        reason = "the weight ratio is checked in floating point"
    )]
    pub fn validate(self) -> Result<Self, ScoreWeightsError> {
        check("thrill_match", self.thrill_match)?;
        check("wait_time", self.wait_time)?;
        if self.thrill_match == 0.0_f32 {
            return Err(ScoreWeightsError::ZeroThrillWeight);
        }
        if self.wait_time * MIN_WEIGHT_RATIO > self.thrill_match {
            return Err(ScoreWeightsError::WaitOutweighsThrill);
        }
        Ok(self)
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            thrill_match: 40.0_f32,
            wait_time: 0.5_f32,
        }
    }
}

/// Constants of the post-ride satisfaction formula.
///
/// `delta = min(thrill_match * per_match_point, max_gain) - observed_wait *
/// wait_penalty_per_minute`, in satisfaction points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SatisfactionWeights {
    /// Points gained per point of thrill match.
    pub per_match_point: f32,
    /// Cap on the gain from a single ride.
    pub max_gain: f32,
    /// Points lost per minute spent queueing.
    pub wait_penalty_per_minute: f32,
}

impl SatisfactionWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`ScoreWeightsError`] when a weight is not finite or is
    /// negative.
    pub fn validate(self) -> Result<Self, ScoreWeightsError> {
        check("per_match_point", self.per_match_point)?;
        check("max_gain", self.max_gain)?;
        check("wait_penalty_per_minute", self.wait_penalty_per_minute)?;
        Ok(self)
    }
}

impl Default for SatisfactionWeights {
    fn default() -> Self {
        Self {
            per_match_point: 2.0_f32,
            max_gain: 20.0_f32,
            wait_penalty_per_minute: 0.25_f32,
        }
    }
}

fn check(name: &'static str, value: f32) -> Result<(), ScoreWeightsError> {
    if !value.is_finite() {
        return Err(ScoreWeightsError::NonFinite { name });
    }
    if value < 0.0_f32 {
        return Err(ScoreWeightsError::Negative { name });
    }
    Ok(())
}
