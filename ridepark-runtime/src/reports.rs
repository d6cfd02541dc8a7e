//! Serialisable results returned by [`Park`](crate::Park) operations.
//!
//! Reports are owned snapshots: they hold no locks and stay valid after the
//! park changes.

use chrono::{DateTime, Utc};
use ridepark_core::{Dispatch, Lane, RideId, ThrillLevel, TicketType, VisitorId};
use serde::Serialize;

/// A ride as listed by [`Park::rides`](crate::Park::rides).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RideSummary {
    /// Ride identifier.
    pub ride_id: RideId,
    /// Display name.
    pub name: String,
    /// Intensity of the ride.
    pub thrill_level: ThrillLevel,
    /// Riders admitted per cycle.
    pub capacity: u32,
    /// Whether the ride accepts visitors.
    pub is_operational: bool,
    /// Visitors waiting in both lanes.
    pub queue_size: usize,
    /// Estimated wait in minutes.
    pub wait_time: u32,
    /// Informational ride length in seconds.
    pub ride_duration_secs: u64,
    /// Committed experiences, net of undos.
    pub visitors_served: u64,
}

/// A visitor as listed by [`Park::visitors`](crate::Park::visitors).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitorSummary {
    /// Visitor identifier.
    pub visitor_id: VisitorId,
    /// Display name.
    pub name: String,
    /// Preferred thrill level.
    pub thrill_preference: ThrillLevel,
    /// Admission tier.
    pub ticket_type: TicketType,
    /// Completed rides, net of undos.
    pub rides_completed: u32,
    /// Satisfaction on the `0..=100` scale.
    pub satisfaction: f32,
    /// Total walking distance in metres.
    pub total_distance: u64,
    /// Ride last experienced.
    pub location: Option<RideId>,
    /// Retained history entries.
    pub history_len: usize,
}

/// Ride removed by [`Park::remove_ride`](crate::Park::remove_ride).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovedRide {
    /// Ride identifier.
    pub ride_id: RideId,
    /// Display name.
    pub name: String,
    /// Visitors dropped from its queue.
    pub evicted: usize,
}

/// Visitor removed by [`Park::remove_visitor`](crate::Park::remove_visitor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovedVisitor {
    /// Visitor identifier.
    pub visitor_id: VisitorId,
    /// Display name.
    pub name: String,
    /// Queue places released.
    pub released_places: usize,
}

/// Result of [`Park::enqueue`](crate::Park::enqueue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnqueueReceipt {
    /// Ride queued for.
    pub ride_id: RideId,
    /// Visitor queued.
    pub visitor_id: VisitorId,
    /// Lane chosen from the visitor's ticket.
    pub lane: Lane,
    /// One-based position within the lane.
    pub position: usize,
    /// Ride wait time after the enqueue, in minutes.
    pub wait_time: u32,
}

/// Result of [`Park::dequeue_batch`](crate::Park::dequeue_batch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Ride dispatched.
    pub ride_id: RideId,
    /// Visitors admitted per lane.
    pub admitted: Dispatch,
    /// Ride wait time after the dispatch, in minutes.
    pub wait_time: u32,
}

/// Result of [`Park::toggle_operational`](crate::Park::toggle_operational).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToggleOutcome {
    /// Ride toggled.
    pub ride_id: RideId,
    /// New status.
    pub is_operational: bool,
    /// Visitors dropped from the queue by a closure.
    pub evicted: usize,
}

/// One ride's queue, from [`Park::queues`](crate::Park::queues).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueSnapshot {
    /// Ride identifier.
    pub ride_id: RideId,
    /// Display name.
    pub name: String,
    /// Visitors in the regular lane.
    pub regular_size: usize,
    /// Visitors in the premium lane.
    pub premium_size: usize,
    /// Riders admitted per cycle.
    pub capacity: u32,
    /// Estimated wait in minutes.
    pub wait_time: u32,
    /// Whether the ride accepts visitors.
    pub is_operational: bool,
}

/// Result of [`Park::experience`](crate::Park::experience).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceOutcome {
    /// Confirmation message.
    pub message: String,
    /// Ride experienced.
    pub ride_id: RideId,
    /// Ride name.
    pub ride_name: String,
    /// Visitor who rode.
    pub visitor_id: VisitorId,
    /// Visitor name.
    pub visitor_name: String,
    /// Closeness of the ride to the visitor's preference.
    pub thrill_match: u8,
    /// Wait observed at boarding, in minutes.
    pub observed_wait: u32,
    /// Satisfaction after the ride.
    pub satisfaction: f32,
    /// Informational ride length in seconds.
    pub ride_duration_secs: u64,
    /// Satisfaction change actually applied.
    pub satisfaction_delta: f32,
    /// Walking distance added, in metres.
    pub distance_delta: u64,
}

/// Result of [`Park::undo`](crate::Park::undo).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UndoOutcome {
    /// Visitor whose ride was undone.
    pub visitor_id: VisitorId,
    /// Ride that was undone.
    pub ride_id: RideId,
    /// Name recorded for that ride.
    pub ride_name: String,
    /// Satisfaction after the undo.
    pub satisfaction: f32,
}

/// One history entry, from [`Park::history`](crate::Park::history).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRecord {
    /// Ride experienced.
    pub ride_id: RideId,
    /// Ride name recorded at the time.
    pub ride_name: String,
    /// Commit time.
    pub timestamp: DateTime<Utc>,
    /// Satisfaction change applied.
    pub satisfaction_delta: f32,
    /// Walking distance added, in metres.
    pub distance_delta: u64,
}

/// A recommended ride, from [`Park::suggest`](crate::Park::suggest).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
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
    /// Whether the visitor rode it among their most recent rides.
    pub recently_ridden: bool,
}

/// An operational ride and its wait, from
/// [`Park::rides_by_wait_time`](crate::Park::rides_by_wait_time) and the
/// wait-range queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaitTimeEntry {
    /// Ride identifier.
    pub ride_id: RideId,
    /// Display name.
    pub name: String,
    /// Current wait in minutes.
    pub wait_time: u32,
}

/// One stop along a [`PathReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStop {
    /// Ride reached.
    pub ride_id: RideId,
    /// Ride name.
    pub name: String,
    /// Walkway length from the previous stop, in metres.
    pub distance: u32,
    /// Distance walked from the start, in metres.
    pub cumulative_distance: u64,
}

/// Result of [`Park::find_path`](crate::Park::find_path).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathReport {
    /// Stops in walking order, starting at the origin.
    pub path: Vec<PathStop>,
    /// Total walking distance in metres.
    pub total_distance: u64,
}

/// A ride's usage in [`ParkStats::top_rides`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RideUsage {
    /// Ride identifier.
    pub ride_id: RideId,
    /// Display name.
    pub name: String,
    /// Committed experiences, net of undos.
    pub visitors_served: u64,
}

/// Aggregate figures from [`Park::stats`](crate::Park::stats).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParkStats {
    /// Registered visitors.
    pub total_visitors: usize,
    /// Visitors holding a premium ticket.
    pub premium_visitors: usize,
    /// Premium share of visitors, `0.0..=1.0`.
    pub premium_ratio: f32,
    /// Mean visitor satisfaction; zero without visitors.
    pub average_satisfaction: f32,
    /// Distance walked by all visitors, in metres.
    pub total_distance: u64,
    /// Completed rides across all visitors, net of undos.
    pub rides_completed: u64,
    /// Registered rides.
    pub total_rides: usize,
    /// Rides currently operational.
    pub active_rides: usize,
    /// Mean wait over operational rides; zero when none are open.
    pub average_wait_time: f32,
    /// Seats per cycle across all rides.
    pub total_capacity: u64,
    /// Busiest rides by visitors served, ties by ride id.
    pub top_rides: Vec<RideUsage>,
}
