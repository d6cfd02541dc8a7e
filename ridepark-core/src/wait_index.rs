//! Operational rides ordered by current wait time.
//!
//! Entries are keyed by `(wait_time, ride_id)` so ties resolve by ride id and
//! every update costs `O(log n)` instead of a full re-sort per read.

use std::collections::{BTreeMap, HashMap};
use std::ops::RangeInclusive;

use crate::{RideId, ThrillLevel};

/// Snapshot of an operational ride as held by the index.
///
/// Only the wait time changes after registration; the other fields are
/// copied from the ride when it is indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedRide {
    /// Ride identifier.
    pub id: RideId,
    /// Display name.
    pub name: String,
    /// Intensity of the ride.
    pub thrill_level: ThrillLevel,
    /// Riders admitted per cycle.
    pub capacity: u32,
    /// Current estimated wait, in minutes.
    pub wait_time: u32,
}

/// Ordered index of operational rides by wait time.
///
/// # Examples
/// ```
/// use ridepark_core::{IndexedRide, RideId, ThrillLevel, WaitTimeIndex};
///
/// let ride = |id, wait_time| IndexedRide {
///     id: RideId::new(id),
///     name: format!("Ride {id}"),
///     thrill_level: ThrillLevel::new(5).unwrap(),
///     capacity: 4,
///     wait_time,
/// };
/// let mut index = WaitTimeIndex::new();
/// index.insert(ride(1, 30));
/// index.insert(ride(2, 10));
/// index.update(RideId::new(1), 5);
///
/// let order: Vec<u32> = index.iter().map(|entry| entry.id.get()).collect();
/// assert_eq!(order, vec![1, 2]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WaitTimeIndex {
    ordered: BTreeMap<(u32, RideId), IndexedRide>,
    current: HashMap<RideId, u32>,
}

impl WaitTimeIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a ride.
    pub fn insert(&mut self, ride: IndexedRide) {
        if let Some(previous) = self.current.insert(ride.id, ride.wait_time) {
            self.ordered.remove(&(previous, ride.id));
        }
        self.ordered.insert((ride.wait_time, ride.id), ride);
    }

    /// Re-key `ride` under a new wait time.
    ///
    /// Returns `false` when the ride is not indexed.
    pub fn update(&mut self, ride: RideId, wait_time: u32) -> bool {
        let Some(previous) = self.current.get_mut(&ride) else {
            return false;
        };
        if *previous == wait_time {
            return true;
        }
        let old_key = (*previous, ride);
        *previous = wait_time;
        if let Some(mut entry) = self.ordered.remove(&old_key) {
            entry.wait_time = wait_time;
            self.ordered.insert((wait_time, ride), entry);
        }
        true
    }

    /// Remove a ride from the index.
    pub fn remove(&mut self, ride: RideId) -> Option<IndexedRide> {
        let wait_time = self.current.remove(&ride)?;
        self.ordered.remove(&(wait_time, ride))
    }

    /// Borrow the entry for `ride`.
    #[must_use]
    pub fn get(&self, ride: RideId) -> Option<&IndexedRide> {
        let wait_time = self.current.get(&ride)?;
        self.ordered.get(&(*wait_time, ride))
    }

    /// Iterate rides ascending by wait time, ties by ride id.
    pub fn iter(&self) -> impl Iterator<Item = &IndexedRide> {
        self.ordered.values()
    }

    /// Clone the ordered contents.
    #[must_use]
    pub fn ordered_snapshot(&self) -> Vec<IndexedRide> {
        self.iter().cloned().collect()
    }

    /// Rides whose wait lies in `waits`, ascending by wait time then ride id.
    ///
    /// An empty range yields nothing.
    ///
    /// # Examples
    /// ```
    /// use ridepark_core::{IndexedRide, RideId, ThrillLevel, WaitTimeIndex};
    ///
    /// let mut index = WaitTimeIndex::new();
    /// for (id, wait_time) in [(1, 0), (2, 14), (3, 7), (4, 35)] {
    ///     index.insert(IndexedRide {
    ///         id: RideId::new(id),
    ///         name: format!("Ride {id}"),
    ///         thrill_level: ThrillLevel::new(5).unwrap(),
    ///         capacity: 4,
    ///         wait_time,
    ///     });
    /// }
    /// let within: Vec<u32> = index.within(7..=14).map(|entry| entry.id.get()).collect();
    /// assert_eq!(within, vec![3, 2]);
    /// ```
    pub fn within(&self, waits: RangeInclusive<u32>) -> impl Iterator<Item = &IndexedRide> {
        let (min, max) = waits.into_inner();
        let bounds =
            (min <= max).then_some((min, RideId::new(u32::MIN))..=(max, RideId::new(u32::MAX)));
        bounds
            .into_iter()
            .flat_map(|keys| self.ordered.range(keys).map(|(_, ride)| ride))
    }

    /// Ride with the shortest wait, ties by lowest ride id.
    #[must_use]
    pub fn shortest(&self) -> Option<&IndexedRide> {
        self.ordered.first_key_value().map(|(_, ride)| ride)
    }

    /// Largest wait time currently indexed, or zero when empty.
    #[must_use]
    pub fn max_wait(&self) -> u32 {
        self.ordered
            .last_key_value()
            .map_or(0, |((wait_time, _), _)| *wait_time)
    }

    /// Number of indexed rides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
