//! Score rides for a visitor.
//!
//! The [`Scorer`] trait turns the gap between a ride's thrill level and a
//! visitor's preference into a recommendation priority and a satisfaction
//! change once the ride has been experienced.

use std::cmp::Ordering;

use crate::{IndexedRide, RideId, SatisfactionDelta, ThrillLevel};

/// Highest thrill match, reached when ride and preference are equal.
pub const MAX_THRILL_MATCH: u8 = 10;

/// Rank rides and rate experiences for a visitor.
///
/// Implementations must be thread-safe (`Send` + `Sync`) so one scorer can be
/// shared by concurrent callers. Methods are infallible; a scorer lacking
/// information should fall back to a neutral value rather than panic.
///
/// Implementations must:
/// - Produce finite priorities.
/// - Rank a ride with a better thrill match above one with a worse match when
///   their wait times are equal.
///
/// Use [`Scorer::sanitise`] to apply these guards.
///
/// # Examples
///
/// ```rust
/// use ridepark_core::{SatisfactionDelta, Scorer, ThrillLevel};
///
/// struct MatchOnly;
///
/// impl Scorer for MatchOnly {
///     fn priority(&self, thrill_match: u8, _wait: u32, _max_wait: u32) -> f32 {
///         f32::from(thrill_match)
///     }
///
///     fn satisfaction_delta(&self, _thrill_match: u8, _observed_wait: u32) -> SatisfactionDelta {
///         SatisfactionDelta::ZERO
///     }
/// }
///
/// let ride = ThrillLevel::new(8).unwrap();
/// let visitor = ThrillLevel::new(5).unwrap();
/// assert_eq!(MatchOnly.thrill_match(ride, visitor), 7);
/// ```
pub trait Scorer: Send + Sync {
    /// Closeness of `ride` to `preference` on the `0..=10` scale.
    fn thrill_match(&self, ride: ThrillLevel, preference: ThrillLevel) -> u8 {
        MAX_THRILL_MATCH.saturating_sub(ride.distance(preference))
    }

    /// Recommendation priority for a ride with the given `thrill_match` and
    /// `wait` when the longest wait among candidates is `max_wait`.
    fn priority(&self, thrill_match: u8, wait: u32, max_wait: u32) -> f32;

    /// Satisfaction change for a completed ride that was queued for
    /// `observed_wait` minutes.
    fn satisfaction_delta(&self, thrill_match: u8, observed_wait: u32) -> SatisfactionDelta;

    /// Replace non-finite priorities with `0.0`.
    fn sanitise(priority: f32) -> f32
    where
        Self: Sized,
    {
        if priority.is_finite() { priority } else { 0.0 }
    }
}

/// A candidate ride with its recommendation score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRide {
    /// Ride identifier.
    pub ride_id: RideId,
    /// Display name.
    pub name: String,
    /// Closeness to the visitor's preference, `0..=10`.
    pub thrill_match: u8,
    /// Current wait in minutes.
    pub wait_time: u32,
    /// Recommendation priority; higher is better.
    pub priority_score: f32,
}

/// Rank `candidates` for a visitor preferring `preference` and keep the best
/// `limit`.
///
/// Results are ordered by descending priority, then ascending wait time, then
/// ascending ride id. The longest wait among `candidates` anchors the wait
/// term of [`Scorer::priority`].
pub fn rank_rides<S: Scorer>(
    scorer: &S,
    preference: ThrillLevel,
    candidates: &[IndexedRide],
    limit: usize,
) -> Vec<RankedRide> {
    let max_wait = candidates.iter().map(|ride| ride.wait_time).max().unwrap_or(0);
    let mut ranked: Vec<RankedRide> = candidates
        .iter()
        .map(|ride| {
            let thrill_match = scorer.thrill_match(ride.thrill_level, preference);
            let priority_score =
                S::sanitise(scorer.priority(thrill_match, ride.wait_time, max_wait));
            RankedRide {
                ride_id: ride.id,
                name: ride.name.clone(),
                thrill_match,
                wait_time: ride.wait_time,
                priority_score,
            }
        })
        .collect();
    ranked.sort_by(compare_ranked);
    ranked.truncate(limit);
    ranked
}

fn compare_ranked(lhs: &RankedRide, rhs: &RankedRide) -> Ordering {
    rhs.priority_score
        .total_cmp(&lhs.priority_score)
        .then_with(|| lhs.wait_time.cmp(&rhs.wait_time))
        .then_with(|| lhs.ride_id.cmp(&rhs.ride_id))
}
