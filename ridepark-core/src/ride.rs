//! Rides and their creation parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{EngineError, RideId, ThrillLevel};

const BASE_DURATION_SECS: u64 = 30;
const DURATION_SECS_PER_THRILL: u64 = 10;

/// Parameters for registering a ride.
///
/// # Examples
/// ```
/// use ridepark_core::{NewRide, Ride, RideId, ThrillLevel};
///
/// let spec = NewRide::new(RideId::new(1), "Cyclone", ThrillLevel::new(9).unwrap(), 12);
/// let ride = Ride::new(spec).unwrap();
/// assert!(ride.is_operational);
/// assert_eq!(ride.base_duration().as_secs(), 120);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRide {
    /// Caller-assigned identifier, also the ride's walkway node.
    pub id: RideId,
    /// Display name.
    pub name: String,
    /// Intensity of the ride.
    pub thrill_level: ThrillLevel,
    /// Riders admitted per dispatch cycle.
    pub capacity: u32,
    /// Whether the ride opens immediately.
    #[serde(default = "default_operational")]
    pub is_operational: bool,
}

const fn default_operational() -> bool {
    true
}

impl NewRide {
    /// Build creation parameters for an operational ride.
    pub fn new(id: RideId, name: impl Into<String>, thrill_level: ThrillLevel, capacity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            thrill_level,
            capacity,
            is_operational: true,
        }
    }

    /// Mark the ride as closed on registration.
    #[must_use]
    pub const fn closed(mut self) -> Self {
        self.is_operational = false;
        self
    }
}

/// A ride registered with the park.
///
/// Queue sizes and wait times are not stored here; they are derived from the
/// ride's [`QueueState`](crate::QueueState).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ride {
    /// Identifier and walkway node.
    pub id: RideId,
    /// Display name.
    pub name: String,
    /// Intensity of the ride.
    pub thrill_level: ThrillLevel,
    /// Riders admitted per dispatch cycle, always positive.
    pub capacity: u32,
    /// Whether the ride currently accepts visitors.
    pub is_operational: bool,
    /// Committed experiences, net of undos.
    pub visitors_served: u64,
}

impl Ride {
    /// Validate and construct a [`Ride`].
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInput`] for a blank name or zero
    /// capacity.
    pub fn new(spec: NewRide) -> Result<Self, EngineError> {
        let name = spec.name.trim();
        if name.is_empty() {
            return Err(EngineError::invalid_input("ride name", "must not be blank"));
        }
        if spec.capacity == 0 {
            return Err(EngineError::invalid_input("capacity", "must be positive"));
        }
        Ok(Self {
            id: spec.id,
            name: name.to_owned(),
            thrill_level: spec.thrill_level,
            capacity: spec.capacity,
            is_operational: spec.is_operational,
            visitors_served: 0,
        })
    }

    /// Informational duration of one ride: 30 s plus 10 s per thrill level.
    ///
    /// Callers may use this for a presentation countdown; the engine never
    /// waits on it.
    #[must_use]
    pub fn base_duration(&self) -> Duration {
        let thrill = u64::from(self.thrill_level.get());
        Duration::from_secs(BASE_DURATION_SECS + thrill * DURATION_SECS_PER_THRILL)
    }
}
