//! Two-lane admission queue for a single ride.
//!
//! Premium visitors are dispatched first, but whenever both lanes are waiting
//! and the ride seats at least two, one seat per cycle is held for the regular
//! lane so it always makes progress.

use std::collections::VecDeque;

use serde::Serialize;

use crate::{EngineError, TicketType, VisitorId};

/// Queue lane a visitor waits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lane {
    /// Standard lane.
    Regular,
    /// Fast-pass lane with preferential dispatch.
    Premium,
}

impl From<TicketType> for Lane {
    fn from(ticket: TicketType) -> Self {
        match ticket {
            TicketType::Normal => Self::Regular,
            TicketType::Premium => Self::Premium,
        }
    }
}

/// Visitors admitted by one dispatch cycle, in boarding order per lane.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dispatch {
    /// Admitted from the premium lane.
    pub premium: Vec<VisitorId>,
    /// Admitted from the regular lane.
    pub regular: Vec<VisitorId>,
}

impl Dispatch {
    /// Total visitors admitted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.premium.len() + self.regular.len()
    }

    /// Whether nobody was admitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.premium.is_empty() && self.regular.is_empty()
    }
}

/// Admission state for one ride.
///
/// # Examples
/// ```
/// use ridepark_core::{Lane, QueueState, VisitorId};
///
/// let mut queue = QueueState::new(2);
/// for raw in 1000..1003 {
///     queue.enqueue(VisitorId::new(raw).unwrap(), Lane::Premium).unwrap();
/// }
/// queue.enqueue(VisitorId::new(2000).unwrap(), Lane::Regular).unwrap();
///
/// let batch = queue.dispatch();
/// assert_eq!(batch.premium.len(), 1);
/// assert_eq!(batch.regular.len(), 1);
/// assert_eq!(queue.wait_time(7), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueState {
    regular: VecDeque<VisitorId>,
    premium: VecDeque<VisitorId>,
    capacity: u32,
}

impl QueueState {
    /// Create empty lanes for a ride seating `capacity` riders per cycle.
    ///
    /// A zero capacity is raised to one; rides validate capacity before
    /// reaching this point.
    #[must_use]
    pub fn new(capacity: u32) -> Self {
        Self {
            regular: VecDeque::new(),
            premium: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Riders admitted per cycle.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Visitors waiting in the regular lane.
    #[must_use]
    pub fn regular_len(&self) -> usize {
        self.regular.len()
    }

    /// Visitors waiting in the premium lane.
    #[must_use]
    pub fn premium_len(&self) -> usize {
        self.premium.len()
    }

    /// Visitors waiting in both lanes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regular.len() + self.premium.len()
    }

    /// Whether both lanes are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regular.is_empty() && self.premium.is_empty()
    }

    /// Whether `visitor` holds a place in either lane.
    #[must_use]
    pub fn contains(&self, visitor: VisitorId) -> bool {
        self.regular.contains(&visitor) || self.premium.contains(&visitor)
    }

    /// Append `visitor` to `lane` and return their one-based position in it.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInput`] when the visitor is already
    /// queued for this ride.
    pub fn enqueue(&mut self, visitor: VisitorId, lane: Lane) -> Result<usize, EngineError> {
        if self.contains(visitor) {
            return Err(EngineError::invalid_input(
                "visitor",
                format!("visitor {visitor} is already queued for this ride"),
            ));
        }
        let target = match lane {
            Lane::Regular => &mut self.regular,
            Lane::Premium => &mut self.premium,
        };
        target.push_back(visitor);
        Ok(target.len())
    }

    /// Admit one cycle's worth of visitors.
    pub fn dispatch(&mut self) -> Dispatch {
        let seats = usize::try_from(self.capacity).unwrap_or(usize::MAX);
        let reserved = usize::from(seats >= 2 && !self.premium.is_empty() && !self.regular.is_empty());
        let premium_take = self.premium.len().min(seats - reserved);
        let regular_take = self.regular.len().min(seats - premium_take);
        Dispatch {
            premium: self.premium.drain(..premium_take).collect(),
            regular: self.regular.drain(..regular_take).collect(),
        }
    }

    /// Remove `visitor` from whichever lane holds them.
    pub fn remove(&mut self, visitor: VisitorId) -> bool {
        let before = self.len();
        self.regular.retain(|queued| *queued != visitor);
        self.premium.retain(|queued| *queued != visitor);
        self.len() != before
    }

    /// Empty both lanes and return how many visitors were evicted.
    pub fn clear(&mut self) -> usize {
        let evicted = self.len();
        self.regular.clear();
        self.premium.clear();
        evicted
    }

    /// Estimated wait in minutes: full cycles needed to clear the queue
    /// times the cycle length.
    #[must_use]
    pub fn wait_time(&self, cycle_minutes: u32) -> u32 {
        let waiting = u32::try_from(self.len()).unwrap_or(u32::MAX);
        waiting
            .div_ceil(self.capacity)
            .saturating_mul(cycle_minutes)
    }
}
