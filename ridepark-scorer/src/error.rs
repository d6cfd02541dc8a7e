//! Error types raised while validating scorer configuration.
#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors raised when a weight set cannot be used for scoring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreWeightsError {
    /// A weight was NaN or infinite.
    #[error("weight {name} must be finite")]
    NonFinite {
        /// Name of the offending weight.
        name: &'static str,
    },
    /// A weight was below zero.
    #[error("weight {name} must not be negative")]
    Negative {
        /// Name of the offending weight.
        name: &'static str,
    },
    /// The thrill-match weight was zero, so suggestions would ignore
    /// preferences entirely.
    #[error("weight thrill_match must be positive")]
    ZeroThrillWeight,
    /// The wait weight was too close to the thrill-match weight for thrill
    /// match to dominate the priority.
    #[error(
        "weight thrill_match must be at least {} times weight wait_time",
        crate::MIN_WEIGHT_RATIO
    )]
    WaitOutweighsThrill,
}
