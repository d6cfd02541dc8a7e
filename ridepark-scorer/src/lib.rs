//! Thrill-based scoring for Ridepark rides.
//!
//! [`ThrillScorer`] implements the [`Scorer`](ridepark_core::Scorer) trait:
//! - **Recommendation priority** rewards rides whose thrill level sits close
//!   to the visitor's preference and, with a much smaller weight, rides with
//!   shorter queues than the busiest ride. The queue bonus is capped below
//!   one thrill-match point.
//! - **Satisfaction delta** grants points for a good thrill match, capped per
//!   ride, and deducts points for every minute spent queueing.
//!
//! Both formulas are tuned through validated weight sets so callers can
//! adjust the balance without touching engine code.
//!
//! # Examples
//!
//! ```
//! use ridepark_core::Scorer;
//! use ridepark_scorer::ThrillScorer;
//!
//! let scorer = ThrillScorer::default();
//! // A perfect match on the busiest ride still beats a poor match with no queue.
//! assert!(scorer.priority(10, 40, 40) > scorer.priority(4, 5, 40));
//! ```

#![forbid(unsafe_code)]

use ridepark_core::{SatisfactionDelta, Scorer};

mod error;
mod types;

pub use error::ScoreWeightsError;
pub use types::{MIN_WEIGHT_RATIO, SatisfactionWeights, ScoreWeights};

/// Largest share of one thrill-match point the wait bonus may reach.
pub const WAIT_BONUS_SHARE: f32 = 0.9;

/// [`Scorer`] driven by thrill match and queue length.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThrillScorer {
    weights: ScoreWeights,
    satisfaction: SatisfactionWeights,
}

impl ThrillScorer {
    /// Build a scorer from validated weight sets.
    ///
    /// # Errors
    /// Returns [`ScoreWeightsError`] when either weight set fails
    /// validation.
    pub fn new(
        weights: ScoreWeights,
        satisfaction: SatisfactionWeights,
    ) -> Result<Self, ScoreWeightsError> {
        Ok(Self {
            weights: weights.validate()?,
            satisfaction: satisfaction.validate()?,
        })
    }

    /// Recommendation weights in use.
    #[must_use]
    pub const fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Satisfaction weights in use.
    #[must_use]
    pub const fn satisfaction_weights(&self) -> SatisfactionWeights {
        self.satisfaction
    }
}

impl Scorer for ThrillScorer {
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "priority blends integer inputs with floating-point weights"
    )]
    fn priority(&self, thrill_match: u8, wait: u32, max_wait: u32) -> f32 {
        let saved = max_wait.saturating_sub(wait) as f32;
        let wait_bonus =
            (saved * self.weights.wait_time).min(self.weights.thrill_match * WAIT_BONUS_SHARE);
        f32::from(thrill_match) * self.weights.thrill_match + wait_bonus
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "satisfaction scoring mixes integer inputs with floating-point weights"
    )]
    fn satisfaction_delta(&self, thrill_match: u8, observed_wait: u32) -> SatisfactionDelta {
        let gain = (f32::from(thrill_match) * self.satisfaction.per_match_point)
            .min(self.satisfaction.max_gain);
        let penalty = observed_wait as f32 * self.satisfaction.wait_penalty_per_minute;
        let points = gain - penalty;
        if !points.is_finite() {
            log::warn!("satisfaction delta for match {thrill_match} is not finite; using zero");
            return SatisfactionDelta::ZERO;
        }
        SatisfactionDelta::from_points(points)
    }
}

#[cfg(test)]
mod tests;
