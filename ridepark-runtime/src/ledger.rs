//! Ride completion, undo and history.

use ridepark_core::{
    Clock, EngineError, RideId, RideRecord, Router, Scorer, SpatialGraph, VisitorId,
};

use crate::Park;
use crate::park::{live_ride, live_visitor, lock, read};
use crate::reports::{ExperienceOutcome, HistoryRecord, UndoOutcome};

const COMPLETION_MESSAGE: &str = "Ride completed!";

impl<S: Scorer, R: Router, C: Clock> Park<S, R, C> {
    /// Commit a completed ride for a visitor.
    ///
    /// Satisfaction changes by the scorer's delta for the thrill match and
    /// the wait currently shown for the ride, clamped to `0..=100`. The
    /// visitor walks the shortest path from their previous ride; when there
    /// is none, or it cannot be routed, no distance is added. The ride's
    /// queue is left untouched.
    ///
    /// # Errors
    /// Returns [`EngineError::NotFound`] when either id is unknown and
    /// [`EngineError::RideClosed`] when the ride is closed. Nothing changes
    /// on failure.
    pub fn experience(&self, ride_id: RideId, visitor_id: VisitorId) -> Result<ExperienceOutcome, EngineError> {
        let ride_shared = self.ride_slot(ride_id)?;
        let visitor_shared = self.visitor_slot(visitor_id)?;

        let mut ride = live_ride(&ride_shared, ride_id)?;
        let mut visitor = live_visitor(&visitor_shared, visitor_id)?;
        if !ride.ride.is_operational {
            return Err(EngineError::RideClosed { ride: ride_id });
        }

        let thrill_match = self
            .scorer
            .thrill_match(ride.ride.thrill_level, visitor.visitor.thrill_preference);
        let observed_wait = ride.queue.wait_time(self.config.cycle_minutes);
        let satisfaction_delta = self.scorer.satisfaction_delta(thrill_match, observed_wait);
        let distance = match visitor.visitor.location() {
            Some(previous) if previous != ride_id => {
                self.walking_distance(&read(&self.graph), previous, ride_id)
            }
            _ => 0,
        };

        let entry = visitor.visitor.record_ride(RideRecord {
            ride_id,
            ride_serial: ride.serial,
            ride_name: ride.ride.name.clone(),
            timestamp: self.clock.now(),
            satisfaction_delta,
            distance,
        });
        ride.ride.visitors_served = ride.ride.visitors_served.saturating_add(1);
        log::debug!(
            "visitor {visitor_id} rode {ride_id}: satisfaction {} ({}), walked {distance} m",
            visitor.visitor.satisfaction(),
            entry.satisfaction_delta
        );

        Ok(ExperienceOutcome {
            message: COMPLETION_MESSAGE.to_owned(),
            ride_id,
            ride_name: entry.ride_name,
            visitor_id,
            visitor_name: visitor.visitor.name.clone(),
            thrill_match,
            observed_wait,
            satisfaction: visitor.visitor.satisfaction().as_points(),
            ride_duration_secs: ride.ride.base_duration().as_secs(),
            satisfaction_delta: entry.satisfaction_delta.as_points(),
            distance_delta: distance,
        })
    }

    /// Reverse a visitor's most recent ride.
    ///
    /// Satisfaction, ride count, distance and location return to their values
    /// before that ride. The ride's served count drops by one only if that
    /// same ride is still registered; a ride re-added under the same id keeps
    /// its own count.
    ///
    /// # Errors
    /// Returns [`EngineError::NotFound`] for unknown visitors and
    /// [`EngineError::NoHistory`] when there is nothing to undo.
    pub fn undo(&self, visitor_id: VisitorId) -> Result<UndoOutcome, EngineError> {
        let visitor_shared = self.visitor_slot(visitor_id)?;
        loop {
            let top = live_visitor(&visitor_shared, visitor_id)?
                .visitor
                .history()
                .last()
                .map(|entry| (entry.ride_id, entry.ride_serial))
                .ok_or(EngineError::NoHistory { visitor: visitor_id })?;

            // Ride before visitor: release the visitor, then lock both in order.
            let ride_shared = self.ride_slot(top.0).ok();
            let mut ride = ride_shared.as_ref().map(|shared| lock(shared.as_ref()));
            let mut visitor = live_visitor(&visitor_shared, visitor_id)?;
            let current = visitor
                .visitor
                .history()
                .last()
                .map(|entry| (entry.ride_id, entry.ride_serial));
            if current != Some(top) {
                continue;
            }

            let entry = visitor.visitor.undo_last_ride()?;
            if let Some(slot) = ride
                .as_mut()
                .filter(|slot| !slot.retired && slot.serial == entry.ride_serial)
            {
                slot.ride.visitors_served = slot.ride.visitors_served.saturating_sub(1);
            }
            log::debug!("visitor {visitor_id} undid ride {}", entry.ride_id);
            return Ok(UndoOutcome {
                visitor_id,
                ride_id: entry.ride_id,
                ride_name: entry.ride_name,
                satisfaction: visitor.visitor.satisfaction().as_points(),
            });
        }
    }

    /// A visitor's rides, most recent first.
    ///
    /// # Errors
    /// Returns [`EngineError::NotFound`] for unknown visitors.
    pub fn history(&self, visitor_id: VisitorId) -> Result<Vec<HistoryRecord>, EngineError> {
        let shared = self.visitor_slot(visitor_id)?;
        let slot = live_visitor(&shared, visitor_id)?;
        Ok(slot
            .visitor
            .history()
            .iter_recent()
            .map(|entry| HistoryRecord {
                ride_id: entry.ride_id,
                ride_name: entry.ride_name.clone(),
                timestamp: entry.timestamp,
                satisfaction_delta: entry.satisfaction_delta.as_points(),
                distance_delta: entry.distance_delta,
            })
            .collect())
    }

    /// Whether `ride_id` is among the visitor's most recent rides.
    ///
    /// # Errors
    /// Returns [`EngineError::NotFound`] for unknown visitors.
    pub fn was_recently_ridden(&self, visitor_id: VisitorId, ride_id: RideId) -> Result<bool, EngineError> {
        let shared = self.visitor_slot(visitor_id)?;
        let slot = live_visitor(&shared, visitor_id)?;
        Ok(slot
            .visitor
            .history()
            .ridden_within(ride_id, self.config.recent_window))
    }

    fn walking_distance(&self, graph: &SpatialGraph, from: RideId, to: RideId) -> u64 {
        match self.router.find_path(graph, from, to) {
            Ok(path) => path.total_distance(),
            Err(err) => {
                log::warn!("no walking distance from ride {from} to ride {to}: {err}; counting 0 m");
                0
            }
        }
    }
}
