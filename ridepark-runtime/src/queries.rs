//! Read-only views: suggestions, wait times, paths and statistics.

use std::ops::RangeInclusive;

use ridepark_core::{
    Clock, EngineError, IndexedRide, RideId, Router, Scorer, TicketType, VisitorId, rank_rides,
};

use crate::Park;
use crate::park::{live_visitor, lock, read};
use crate::reports::{ParkStats, PathReport, PathStop, RideUsage, Suggestion, WaitTimeEntry};

impl<S: Scorer, R: Router, C: Clock> Park<S, R, C> {
    /// Best operational rides for a visitor, highest priority first.
    ///
    /// Ties resolve by shorter wait, then lower ride id. At most
    /// [`ParkConfig::suggestion_limit`](crate::ParkConfig::suggestion_limit)
    /// entries are returned. Closed rides never appear.
    ///
    /// # Errors
    /// Returns [`EngineError::NotFound`] for unknown visitors.
    pub fn suggest(&self, visitor_id: VisitorId) -> Result<Vec<Suggestion>, EngineError> {
        let shared = self.visitor_slot(visitor_id)?;
        let (preference, recent) = {
            let slot = live_visitor(&shared, visitor_id)?;
            let recent: Vec<RideId> = slot
                .visitor
                .history()
                .iter_recent()
                .take(self.config.recent_window)
                .map(|entry| entry.ride_id)
                .collect();
            (slot.visitor.thrill_preference, recent)
        };

        let candidates = lock(&self.wait_index).ordered_snapshot();
        let ranked = rank_rides(&self.scorer, preference, &candidates, self.config.suggestion_limit);
        Ok(ranked
            .into_iter()
            .map(|ride| Suggestion {
                recently_ridden: recent.contains(&ride.ride_id),
                ride_id: ride.ride_id,
                name: ride.name,
                thrill_match: ride.thrill_match,
                wait_time: ride.wait_time,
                priority_score: ride.priority_score,
            })
            .collect())
    }

    /// Operational rides ascending by wait time, ties by ride id.
    #[must_use]
    pub fn rides_by_wait_time(&self) -> Vec<WaitTimeEntry> {
        lock(&self.wait_index).iter().map(wait_entry).collect()
    }

    /// Operational rides whose wait lies in `waits` minutes, ordered like
    /// [`rides_by_wait_time`](Self::rides_by_wait_time).
    ///
    /// `0..=max` lists every ride reachable within `max` minutes. An empty
    /// range yields nothing.
    #[must_use]
    pub fn rides_with_wait(&self, waits: RangeInclusive<u32>) -> Vec<WaitTimeEntry> {
        lock(&self.wait_index).within(waits).map(wait_entry).collect()
    }

    /// Operational ride with the shortest wait, ties by lowest ride id.
    #[must_use]
    pub fn shortest_wait_ride(&self) -> Option<WaitTimeEntry> {
        lock(&self.wait_index).shortest().map(wait_entry)
    }

    /// Shortest walk between two rides.
    ///
    /// # Errors
    /// Returns [`EngineError::NotFound`] when either ride is unknown and
    /// [`EngineError::NoPath`] when no walkways connect them.
    pub fn find_path(&self, from: RideId, to: RideId) -> Result<PathReport, EngineError> {
        let graph = read(&self.graph);
        let walk = self.router.find_path(&graph, from, to)?;
        let path = walk
            .hops()
            .iter()
            .map(|hop| PathStop {
                ride_id: hop.ride_id,
                name: graph.name(hop.ride_id).unwrap_or_default().to_owned(),
                distance: hop.leg_distance,
                cumulative_distance: hop.cumulative_distance,
            })
            .collect();
        Ok(PathReport {
            path,
            total_distance: walk.total_distance(),
        })
    }

    /// Aggregate figures over the whole park.
    ///
    /// Every ride slot and then every visitor slot is locked before any
    /// figure is read, so no ride completion or undo lands halfway through
    /// the report: while rides and visitors stay registered, the served
    /// counts add up to the completed-ride total. Entities registered after
    /// the report starts are left out.
    #[must_use]
    pub fn stats(&self) -> ParkStats {
        let ride_slots = self.ride_slots();
        let visitor_slots = self.visitor_slots();
        let rides: Vec<_> = ride_slots
            .iter()
            .map(|shared| lock(shared))
            .filter(|slot| !slot.retired)
            .collect();
        let visitors: Vec<_> = visitor_slots
            .iter()
            .map(|shared| lock(shared))
            .filter(|slot| !slot.retired)
            .collect();

        let mut premium_visitors = 0_usize;
        let mut satisfaction_hundredths = 0_u64;
        let mut total_distance = 0_u64;
        let mut rides_completed = 0_u64;
        for slot in &visitors {
            if slot.visitor.ticket_type == TicketType::Premium {
                premium_visitors += 1;
            }
            satisfaction_hundredths += u64::from(slot.visitor.satisfaction().hundredths());
            total_distance = total_distance.saturating_add(slot.visitor.total_distance());
            rides_completed += u64::from(slot.visitor.rides_completed());
        }

        let mut active_rides = 0_usize;
        let mut total_capacity = 0_u64;
        let mut open_wait_minutes = 0_u64;
        let mut usage = Vec::with_capacity(rides.len());
        for slot in &rides {
            total_capacity += u64::from(slot.ride.capacity);
            if slot.ride.is_operational {
                active_rides += 1;
                open_wait_minutes += u64::from(slot.queue.wait_time(self.config.cycle_minutes));
            }
            usage.push(RideUsage {
                ride_id: slot.ride.id,
                name: slot.ride.name.clone(),
                visitors_served: slot.ride.visitors_served,
            });
        }
        usage.sort_by(|lhs, rhs| {
            rhs.visitors_served
                .cmp(&lhs.visitors_served)
                .then_with(|| lhs.ride_id.cmp(&rhs.ride_id))
        });
        usage.truncate(self.config.top_rides);

        ParkStats {
            total_visitors: visitors.len(),
            premium_visitors,
            premium_ratio: ratio(
                u64::try_from(premium_visitors).unwrap_or(u64::MAX),
                visitors.len(),
            ),
            average_satisfaction: mean_points(satisfaction_hundredths, visitors.len()),
            total_distance,
            rides_completed,
            total_rides: rides.len(),
            active_rides,
            average_wait_time: ratio(open_wait_minutes, active_rides),
            total_capacity,
            top_rides: usage,
        }
    }
}

fn wait_entry(ride: &IndexedRide) -> WaitTimeEntry {
    WaitTimeEntry {
        ride_id: ride.id,
        name: ride.name.clone(),
        wait_time: ride.wait_time,
    }
}

/// `numerator / count`, or zero when `count` is zero.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "averages are presented as floating-point figures"
)]
fn ratio(numerator: u64, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    numerator as f32 / count as f32
}

/// Mean of scores summed in hundredths of a point, in points.
#[expect(
    clippy::float_arithmetic,
    reason = "satisfaction is presented in points"
)]
fn mean_points(hundredths: u64, count: usize) -> f32 {
    ratio(hundredths, count) / 100.0
}
