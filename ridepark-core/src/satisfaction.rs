//! Fixed-point satisfaction scores.
//!
//! Scores are stored in hundredths of a point so that applying a delta and
//! reverting it restores the previous value exactly.

use std::fmt;

use serde::{Deserialize, Serialize};

const SCALE: i32 = 100;
const MAX_HUNDREDTHS: u16 = 10_000;

/// A visitor's satisfaction on the inclusive `0.0..=100.0` scale.
///
/// # Examples
/// ```
/// use ridepark_core::{Satisfaction, SatisfactionDelta};
///
/// let start = Satisfaction::from_points(95.0);
/// let (after, applied) = start.apply(SatisfactionDelta::from_points(12.5));
/// assert_eq!(after, Satisfaction::MAX);
/// assert_eq!(applied, SatisfactionDelta::from_points(5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Satisfaction(u16);

impl Satisfaction {
    /// Lowest possible satisfaction.
    pub const MIN: Self = Self(0);
    /// Highest possible satisfaction.
    pub const MAX: Self = Self(MAX_HUNDREDTHS);
    /// Neutral starting point for newly admitted visitors.
    pub const NEUTRAL: Self = Self(5_000);

    /// Convert a floating-point score, clamping into range.
    ///
    /// Non-finite input maps to [`Self::MIN`].
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the value is clamped to 0..=10000 before the cast"
    )]
    pub fn from_points(points: f32) -> Self {
        if !points.is_finite() {
            return Self::MIN;
        }
        let hundredths = (points * 100.0_f32).round().clamp(0.0, f32::from(MAX_HUNDREDTHS));
        Self(hundredths as u16)
    }

    /// Return the score in points.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "presentation converts hundredths back to points"
    )]
    pub fn as_points(self) -> f32 {
        f32::from(self.0) / 100.0_f32
    }

    /// Return the raw score in hundredths of a point.
    #[must_use]
    pub const fn hundredths(self) -> u16 {
        self.0
    }

    /// Apply `delta`, clamping the result into range.
    ///
    /// Returns the new score together with the delta that was actually
    /// applied after clamping. Applying the negation of that delta to the
    /// new score yields the original score.
    #[must_use]
    pub fn apply(self, delta: SatisfactionDelta) -> (Self, SatisfactionDelta) {
        let current = i32::from(self.0);
        let target = current
            .saturating_add(delta.0)
            .clamp(0, i32::from(MAX_HUNDREDTHS));
        let next = u16::try_from(target).unwrap_or(MAX_HUNDREDTHS);
        (Self(next), SatisfactionDelta(target - current))
    }
}

impl Default for Satisfaction {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl From<f32> for Satisfaction {
    fn from(points: f32) -> Self {
        Self::from_points(points)
    }
}

impl From<Satisfaction> for f32 {
    fn from(score: Satisfaction) -> Self {
        score.as_points()
    }
}

impl fmt::Display for Satisfaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.as_points())
    }
}

/// A signed change in satisfaction, in hundredths of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SatisfactionDelta(i32);

impl SatisfactionDelta {
    /// No change.
    pub const ZERO: Self = Self(0);

    /// Convert a floating-point delta expressed in points.
    ///
    /// Non-finite input maps to [`Self::ZERO`]; magnitudes beyond the full
    /// scale are clamped to it.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        reason = "the value is clamped to the full score range before the cast"
    )]
    pub fn from_points(points: f32) -> Self {
        if !points.is_finite() {
            return Self::ZERO;
        }
        let limit = f32::from(MAX_HUNDREDTHS);
        let hundredths = (points * 100.0_f32).round().clamp(-limit, limit);
        Self(hundredths as i32)
    }

    /// Build a delta from hundredths of a point.
    #[must_use]
    pub const fn from_hundredths(hundredths: i32) -> Self {
        Self(hundredths)
    }

    /// Return the delta in hundredths of a point.
    #[must_use]
    pub const fn hundredths(self) -> i32 {
        self.0
    }

    /// Return the delta in points.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "deltas are bounded by the score range so the cast is exact"
    )]
    pub fn as_points(self) -> f32 {
        self.0 as f32 / SCALE as f32
    }

    /// Return the opposite delta.
    #[must_use]
    pub const fn negate(self) -> Self {
        Self(-self.0)
    }
}

impl fmt::Display for SatisfactionDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+.2}", self.as_points())
    }
}
