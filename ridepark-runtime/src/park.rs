//! The [`Park`] engine: registries, locking and entity lifecycle.
//!
//! # Locking
//!
//! Each ride and each visitor sits behind its own mutex inside a registry
//! map. Registry locks are held only long enough to clone an entry's `Arc`,
//! or to add and remove entries. Locks are always taken in this order:
//!
//! 1. ride registry, then visitor registry (never while holding any other
//!    lock);
//! 2. a ride slot, or several in ascending id order;
//! 3. a visitor slot, or several in ascending id order;
//! 4. the walkway graph;
//! 5. the wait-time index.
//!
//! Removed entries are flagged as retired under their own lock, so an
//! operation that cloned the `Arc` just before removal reports
//! [`EngineError::NotFound`] instead of touching a detached entry.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use ridepark_core::{
    Clock, EngineError, EntityKind, IndexedRide, NewRide, NewVisitor, QueueState, Ride, RideId,
    Router, Scorer, SpatialGraph, SystemClock, Visitor, VisitorId, WaitTimeIndex,
};

use crate::ParkConfig;
use crate::reports::{RemovedRide, RemovedVisitor, RideSummary, VisitorSummary};

pub(crate) type Shared<T> = Arc<Mutex<T>>;

/// A ride together with its admission queue.
#[derive(Debug)]
pub(crate) struct RideSlot {
    pub(crate) ride: Ride,
    pub(crate) queue: QueueState,
    /// Unique per registration, so a re-added id is a different ride.
    pub(crate) serial: u64,
    pub(crate) retired: bool,
}

impl RideSlot {
    pub(crate) fn indexed(&self, cycle_minutes: u32) -> IndexedRide {
        IndexedRide {
            id: self.ride.id,
            name: self.ride.name.clone(),
            thrill_level: self.ride.thrill_level,
            capacity: self.ride.capacity,
            wait_time: self.queue.wait_time(cycle_minutes),
        }
    }

    pub(crate) fn summary(&self, cycle_minutes: u32) -> RideSummary {
        RideSummary {
            ride_id: self.ride.id,
            name: self.ride.name.clone(),
            thrill_level: self.ride.thrill_level,
            capacity: self.ride.capacity,
            is_operational: self.ride.is_operational,
            queue_size: self.queue.len(),
            wait_time: self.queue.wait_time(cycle_minutes),
            ride_duration_secs: self.ride.base_duration().as_secs(),
            visitors_served: self.ride.visitors_served,
        }
    }
}

/// A visitor and a removal flag.
#[derive(Debug)]
pub(crate) struct VisitorSlot {
    pub(crate) visitor: Visitor,
    pub(crate) retired: bool,
}

impl VisitorSlot {
    pub(crate) fn summary(&self) -> VisitorSummary {
        let visitor = &self.visitor;
        VisitorSummary {
            visitor_id: visitor.id,
            name: visitor.name.clone(),
            thrill_preference: visitor.thrill_preference,
            ticket_type: visitor.ticket_type,
            rides_completed: visitor.rides_completed(),
            satisfaction: visitor.satisfaction().as_points(),
            total_distance: visitor.total_distance(),
            location: visitor.location(),
            history_len: visitor.history().len(),
        }
    }
}

/// The theme-park operations engine.
///
/// `Park` owns every ride, visitor, walkway and queue. It is `Send + Sync`
/// whenever its scorer, router and clock are, and is meant to be shared
/// through an [`Arc`]. Operations on the same ride or the same visitor
/// serialise; operations on disjoint rides and visitors run independently.
///
/// # Examples
/// ```
/// use ridepark_core::{NewRide, NewVisitor, RideId, ThrillLevel, TicketType, VisitorId};
/// use ridepark_router::DijkstraRouter;
/// use ridepark_runtime::{Park, ParkConfig};
/// use ridepark_scorer::ThrillScorer;
///
/// let park = Park::new(ThrillScorer::default(), DijkstraRouter, ParkConfig::default()).unwrap();
/// park.add_ride(NewRide::new(RideId::new(1), "Cyclone", ThrillLevel::new(9).unwrap(), 12))
///     .unwrap();
/// park.add_visitor(NewVisitor::new(1001, "Ada", ThrillLevel::new(8).unwrap(), TicketType::Normal))
///     .unwrap();
///
/// let visitor = VisitorId::new(1001).unwrap();
/// let outcome = park.experience(RideId::new(1), visitor).unwrap();
/// assert_eq!(outcome.message, "Ride completed!");
/// assert_eq!(park.undo(visitor).unwrap().ride_name, "Cyclone");
/// ```
#[derive(Debug)]
pub struct Park<S, R, C = SystemClock> {
    pub(crate) config: ParkConfig,
    pub(crate) scorer: S,
    pub(crate) router: R,
    pub(crate) clock: C,
    pub(crate) rides: RwLock<BTreeMap<RideId, Shared<RideSlot>>>,
    pub(crate) visitors: RwLock<BTreeMap<VisitorId, Shared<VisitorSlot>>>,
    pub(crate) graph: RwLock<SpatialGraph>,
    pub(crate) wait_index: Mutex<WaitTimeIndex>,
    next_ride_serial: AtomicU64,
}

impl<S: Scorer, R: Router> Park<S, R, SystemClock> {
    /// Create an empty park stamped by the system clock.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInput`] when `config` fails
    /// [`ParkConfig::validate`].
    pub fn new(scorer: S, router: R, config: ParkConfig) -> Result<Self, EngineError> {
        Self::with_clock(scorer, router, SystemClock, config)
    }
}

impl<S: Scorer, R: Router, C: Clock> Park<S, R, C> {
    /// Create an empty park with an explicit clock.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInput`] when `config` fails
    /// [`ParkConfig::validate`].
    pub fn with_clock(scorer: S, router: R, clock: C, config: ParkConfig) -> Result<Self, EngineError> {
        Ok(Self {
            config: config.validate()?,
            scorer,
            router,
            clock,
            rides: RwLock::new(BTreeMap::new()),
            visitors: RwLock::new(BTreeMap::new()),
            graph: RwLock::new(SpatialGraph::new()),
            wait_index: Mutex::new(WaitTimeIndex::new()),
            next_ride_serial: AtomicU64::new(1),
        })
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ParkConfig {
        &self.config
    }

    /// Clock stamping ride history.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Register a ride, its walkway node and, when open, its index entry.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInput`] for invalid parameters and
    /// [`EngineError::Duplicate`] when the id is taken.
    pub fn add_ride(&self, spec: NewRide) -> Result<RideSummary, EngineError> {
        let ride = Ride::new(spec)?;
        let mut rides = write(&self.rides);
        if rides.contains_key(&ride.id) {
            return Err(EngineError::Duplicate {
                kind: EntityKind::Ride,
                id: ride.id.get(),
            });
        }
        let slot = RideSlot {
            queue: QueueState::new(ride.capacity),
            ride,
            serial: self.next_ride_serial.fetch_add(1, Ordering::Relaxed),
            retired: false,
        };
        write(&self.graph).add_node(slot.ride.id, slot.ride.name.clone());
        if slot.ride.is_operational {
            lock(&self.wait_index).insert(slot.indexed(self.config.cycle_minutes));
        }
        let summary = slot.summary(self.config.cycle_minutes);
        rides.insert(slot.ride.id, Arc::new(Mutex::new(slot)));
        log::info!("ride {} ({}) added", summary.ride_id, summary.name);
        Ok(summary)
    }

    /// Remove a ride, evicting its queue and dropping its walkways.
    ///
    /// Visitors whose history mentions the ride keep their entries.
    ///
    /// # Errors
    /// Returns [`EngineError::NotFound`] for unknown rides.
    pub fn remove_ride(&self, ride_id: RideId) -> Result<RemovedRide, EngineError> {
        let mut rides = write(&self.rides);
        let shared = rides
            .remove(&ride_id)
            .ok_or(EngineError::ride_not_found(ride_id))?;
        let mut slot = lock(&shared);
        slot.retired = true;
        let evicted = slot.queue.clear();
        write(&self.graph).remove_node(ride_id);
        lock(&self.wait_index).remove(ride_id);
        log::info!("ride {ride_id} ({}) removed; {evicted} visitors evicted", slot.ride.name);
        Ok(RemovedRide {
            ride_id,
            name: slot.ride.name.clone(),
            evicted,
        })
    }

    /// Every ride, ascending by id.
    #[must_use]
    pub fn rides(&self) -> Vec<RideSummary> {
        self.ride_slots()
            .iter()
            .filter_map(|shared| {
                let slot = lock(shared);
                (!slot.retired).then(|| slot.summary(self.config.cycle_minutes))
            })
            .collect()
    }

    /// Register a visitor.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidId`] for ids below
    /// [`VisitorId::MIN`], [`EngineError::InvalidInput`] for a blank name and
    /// [`EngineError::Duplicate`] when the id is taken.
    pub fn add_visitor(&self, spec: NewVisitor) -> Result<VisitorSummary, EngineError> {
        let visitor = Visitor::new(spec, self.config.history_bound)?;
        let mut visitors = write(&self.visitors);
        if visitors.contains_key(&visitor.id) {
            return Err(EngineError::Duplicate {
                kind: EntityKind::Visitor,
                id: visitor.id.get(),
            });
        }
        let slot = VisitorSlot {
            visitor,
            retired: false,
        };
        let summary = slot.summary();
        visitors.insert(summary.visitor_id, Arc::new(Mutex::new(slot)));
        log::info!("visitor {} ({}) added", summary.visitor_id, summary.name);
        Ok(summary)
    }

    /// Remove a visitor, discarding their history and queue places.
    ///
    /// # Errors
    /// Returns [`EngineError::NotFound`] for unknown visitors.
    pub fn remove_visitor(&self, visitor_id: VisitorId) -> Result<RemovedVisitor, EngineError> {
        let shared = write(&self.visitors)
            .remove(&visitor_id)
            .ok_or(EngineError::visitor_not_found(visitor_id))?;
        let name = {
            let mut slot = lock(&shared);
            slot.retired = true;
            slot.visitor.name.clone()
        };

        let mut released_places = 0;
        for ride in self.ride_slots() {
            let mut slot = lock(&ride);
            if slot.retired || !slot.queue.remove(visitor_id) {
                continue;
            }
            released_places += 1;
            let wait_time = slot.queue.wait_time(self.config.cycle_minutes);
            lock(&self.wait_index).update(slot.ride.id, wait_time);
        }
        log::info!("visitor {visitor_id} ({name}) removed; {released_places} queue places released");
        Ok(RemovedVisitor {
            visitor_id,
            name,
            released_places,
        })
    }

    /// Every visitor, ascending by id.
    #[must_use]
    pub fn visitors(&self) -> Vec<VisitorSummary> {
        self.visitor_slots()
            .iter()
            .filter_map(|shared| {
                let slot = lock(shared);
                (!slot.retired).then(|| slot.summary())
            })
            .collect()
    }

    /// Add or replace the walkway between two rides.
    ///
    /// # Errors
    /// Returns [`EngineError::NotFound`] for unknown rides and
    /// [`EngineError::InvalidInput`] for a zero distance or a self-loop.
    pub fn connect(&self, a: RideId, b: RideId, distance: u32) -> Result<(), EngineError> {
        write(&self.graph).connect(a, b, distance)?;
        log::debug!("walkway {a} <-> {b} set to {distance} m");
        Ok(())
    }

    /// Remove the walkway between two rides.
    ///
    /// Returns whether a walkway existed.
    ///
    /// # Errors
    /// Returns [`EngineError::NotFound`] for unknown rides.
    pub fn disconnect(&self, a: RideId, b: RideId) -> Result<bool, EngineError> {
        let mut graph = write(&self.graph);
        for ride in [a, b] {
            if !graph.contains(ride) {
                return Err(EngineError::ride_not_found(ride));
            }
        }
        Ok(graph.disconnect(a, b))
    }

    pub(crate) fn ride_slot(&self, ride_id: RideId) -> Result<Shared<RideSlot>, EngineError> {
        read(&self.rides)
            .get(&ride_id)
            .cloned()
            .ok_or(EngineError::ride_not_found(ride_id))
    }

    pub(crate) fn visitor_slot(&self, visitor_id: VisitorId) -> Result<Shared<VisitorSlot>, EngineError> {
        read(&self.visitors)
            .get(&visitor_id)
            .cloned()
            .ok_or(EngineError::visitor_not_found(visitor_id))
    }

    pub(crate) fn ride_slots(&self) -> Vec<Shared<RideSlot>> {
        read(&self.rides).values().cloned().collect()
    }

    pub(crate) fn visitor_slots(&self) -> Vec<Shared<VisitorSlot>> {
        read(&self.visitors).values().cloned().collect()
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Lock a ride slot, treating a retired slot as missing.
pub(crate) fn live_ride(
    shared: &Shared<RideSlot>,
    ride_id: RideId,
) -> Result<MutexGuard<'_, RideSlot>, EngineError> {
    let slot = lock(shared);
    if slot.retired {
        return Err(EngineError::ride_not_found(ride_id));
    }
    Ok(slot)
}

/// Lock a visitor slot, treating a retired slot as missing.
pub(crate) fn live_visitor(
    shared: &Shared<VisitorSlot>,
    visitor_id: VisitorId,
) -> Result<MutexGuard<'_, VisitorSlot>, EngineError> {
    let slot = lock(shared);
    if slot.retired {
        return Err(EngineError::visitor_not_found(visitor_id));
    }
    Ok(slot)
}
