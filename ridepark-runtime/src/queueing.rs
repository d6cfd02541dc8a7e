//! Queue operations: admission, dispatch and ride status.

use ridepark_core::{Clock, EngineError, Lane, RideId, Router, Scorer, VisitorId};

use crate::Park;
use crate::park::{live_ride, live_visitor, lock};
use crate::reports::{BatchReport, EnqueueReceipt, QueueSnapshot, ToggleOutcome};

impl<S: Scorer, R: Router, C: Clock> Park<S, R, C> {
    /// Queue a visitor for a ride in the lane matching their ticket.
    ///
    /// # Errors
    /// Returns [`EngineError::NotFound`] when either id is unknown,
    /// [`EngineError::RideClosed`] when the ride is closed and
    /// [`EngineError::InvalidInput`] when the visitor already holds a place in
    /// this ride's queue.
    pub fn enqueue(&self, ride_id: RideId, visitor_id: VisitorId) -> Result<EnqueueReceipt, EngineError> {
        let ride_shared = self.ride_slot(ride_id)?;
        let visitor_shared = self.visitor_slot(visitor_id)?;

        let mut ride = live_ride(&ride_shared, ride_id)?;
        let lane = Lane::from(live_visitor(&visitor_shared, visitor_id)?.visitor.ticket_type);
        if !ride.ride.is_operational {
            return Err(EngineError::RideClosed { ride: ride_id });
        }
        let position = ride.queue.enqueue(visitor_id, lane)?;
        let wait_time = ride.queue.wait_time(self.config.cycle_minutes);
        lock(&self.wait_index).update(ride_id, wait_time);
        log::debug!("visitor {visitor_id} joined ride {ride_id} {lane:?} lane at {position}; wait {wait_time} min");
        Ok(EnqueueReceipt {
            ride_id,
            visitor_id,
            lane,
            position,
            wait_time,
        })
    }

    /// Admit one dispatch cycle's worth of visitors.
    ///
    /// # Errors
    /// Returns [`EngineError::NotFound`] for unknown rides and
    /// [`EngineError::RideClosed`] for closed rides.
    pub fn dequeue_batch(&self, ride_id: RideId) -> Result<BatchReport, EngineError> {
        let ride_shared = self.ride_slot(ride_id)?;
        let mut ride = live_ride(&ride_shared, ride_id)?;
        if !ride.ride.is_operational {
            return Err(EngineError::RideClosed { ride: ride_id });
        }
        let admitted = ride.queue.dispatch();
        let wait_time = ride.queue.wait_time(self.config.cycle_minutes);
        lock(&self.wait_index).update(ride_id, wait_time);
        log::debug!(
            "ride {ride_id} dispatched {} premium and {} regular; wait {wait_time} min",
            admitted.premium.len(),
            admitted.regular.len()
        );
        Ok(BatchReport {
            ride_id,
            admitted,
            wait_time,
        })
    }

    /// Open a closed ride or close an open one.
    ///
    /// Closing drains both lanes and drops the ride from the wait-time index;
    /// evicted visitors are not requeued elsewhere. Reopening indexes the ride
    /// with a zero wait.
    ///
    /// # Errors
    /// Returns [`EngineError::NotFound`] for unknown rides.
    pub fn toggle_operational(&self, ride_id: RideId) -> Result<ToggleOutcome, EngineError> {
        let ride_shared = self.ride_slot(ride_id)?;
        let mut ride = live_ride(&ride_shared, ride_id)?;
        ride.ride.is_operational = !ride.ride.is_operational;
        let mut evicted = 0;
        if ride.ride.is_operational {
            lock(&self.wait_index).insert(ride.indexed(self.config.cycle_minutes));
            log::info!("ride {ride_id} ({}) reopened", ride.ride.name);
        } else {
            evicted = ride.queue.clear();
            lock(&self.wait_index).remove(ride_id);
            log::info!("ride {ride_id} ({}) closed; {evicted} visitors evicted", ride.ride.name);
        }
        Ok(ToggleOutcome {
            ride_id,
            is_operational: ride.ride.is_operational,
            evicted,
        })
    }

    /// Queue state of every ride, ascending by id.
    #[must_use]
    pub fn queues(&self) -> Vec<QueueSnapshot> {
        self.ride_slots()
            .iter()
            .filter_map(|shared| {
                let slot = lock(shared);
                (!slot.retired).then(|| QueueSnapshot {
                    ride_id: slot.ride.id,
                    name: slot.ride.name.clone(),
                    regular_size: slot.queue.regular_len(),
                    premium_size: slot.queue.premium_len(),
                    capacity: slot.queue.capacity(),
                    wait_time: slot.queue.wait_time(self.config.cycle_minutes),
                    is_operational: slot.ride.is_operational,
                })
            })
            .collect()
    }
}
