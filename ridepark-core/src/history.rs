//! Per-visitor ride history with top-of-stack undo.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::{RideId, SatisfactionDelta};

/// Default number of entries retained per visitor.
pub const DEFAULT_HISTORY_BOUND: usize = 100;

/// One completed ride, with the deltas needed to reverse it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Ride that was experienced.
    pub ride_id: RideId,
    /// Registration serial of the ride, telling apart rides that reused
    /// the same id.
    pub ride_serial: u64,
    /// Ride name at the time of the experience.
    pub ride_name: String,
    /// When the experience was committed.
    pub timestamp: DateTime<Utc>,
    /// Satisfaction change actually applied, after clamping.
    pub satisfaction_delta: SatisfactionDelta,
    /// Walking distance added to the visitor's total, in metres.
    pub distance_delta: u64,
    /// Visitor location before this ride.
    pub previous_location: Option<RideId>,
}

/// Bounded stack of [`HistoryEntry`] values.
///
/// Pushing onto a full stack discards the oldest entry. Only the most recent
/// entry can be removed.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use ridepark_core::{HistoryEntry, RideHistory, RideId, SatisfactionDelta};
///
/// let mut history = RideHistory::with_bound(2);
/// for raw in 1..=3 {
///     history.push(HistoryEntry {
///         ride_id: RideId::new(raw),
///         ride_serial: 0,
///         ride_name: format!("Ride {raw}"),
///         timestamp: Utc::now(),
///         satisfaction_delta: SatisfactionDelta::ZERO,
///         distance_delta: 0,
///         previous_location: None,
///     });
/// }
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.pop().map(|entry| entry.ride_id), Some(RideId::new(3)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideHistory {
    entries: VecDeque<HistoryEntry>,
    bound: usize,
}

impl RideHistory {
    /// Create an empty history holding at most `bound` entries.
    ///
    /// A bound of zero is raised to one so the latest ride can always be
    /// undone.
    #[must_use]
    pub fn with_bound(bound: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            bound: bound.max(1),
        }
    }

    /// Push an entry, discarding the oldest one when full.
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.entries.len() >= self.bound {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Remove and return the most recent entry.
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop_back()
    }

    /// Borrow the most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Iterate entries from most recent to oldest.
    pub fn iter_recent(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    /// Whether `ride` is among the `window` most recent entries.
    #[must_use]
    pub fn ridden_within(&self, ride: RideId, window: usize) -> bool {
        self.iter_recent().take(window).any(|entry| entry.ride_id == ride)
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RideHistory {
    fn default() -> Self {
        Self::with_bound(DEFAULT_HISTORY_BOUND)
    }
}
