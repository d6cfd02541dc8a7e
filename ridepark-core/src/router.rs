//! Shortest walking paths between rides.

use serde::Serialize;

use crate::{EngineError, RideId, SpatialGraph};

/// One stop along a [`WalkPath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PathHop {
    /// Ride reached at this stop.
    pub ride_id: RideId,
    /// Walkway length from the previous stop; zero for the first.
    pub leg_distance: u32,
    /// Distance walked from the start of the path.
    pub cumulative_distance: u64,
}

/// Ordered sequence of rides from a start to a destination.
///
/// The first hop is the start with zero distances. A path from a ride to
/// itself holds a single hop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalkPath {
    hops: Vec<PathHop>,
}

impl WalkPath {
    /// Build a path from ride ids, reading leg lengths from `graph`.
    ///
    /// Returns `None` when two consecutive rides are not directly connected.
    #[must_use]
    pub fn from_rides(graph: &SpatialGraph, rides: &[RideId]) -> Option<Self> {
        let mut hops = Vec::with_capacity(rides.len());
        let mut cumulative = 0_u64;
        let mut previous: Option<RideId> = None;
        for ride in rides {
            let leg_distance = match previous {
                Some(from) => graph.distance(from, *ride)?,
                None => 0,
            };
            cumulative = cumulative.saturating_add(u64::from(leg_distance));
            hops.push(PathHop {
                ride_id: *ride,
                leg_distance,
                cumulative_distance: cumulative,
            });
            previous = Some(*ride);
        }
        Some(Self { hops })
    }

    /// Borrow the hops in walking order.
    #[must_use]
    pub fn hops(&self) -> &[PathHop] {
        &self.hops
    }

    /// Total walking distance in metres.
    #[must_use]
    pub fn total_distance(&self) -> u64 {
        self.hops.last().map_or(0, |hop| hop.cumulative_distance)
    }

    /// Number of walkways traversed.
    #[must_use]
    pub fn leg_count(&self) -> usize {
        self.hops.len().saturating_sub(1)
    }
}

/// Find the shortest walk between two rides.
///
/// Implementations must return [`EngineError::NotFound`] when either ride is
/// absent from the graph and [`EngineError::NoPath`] when the rides lie in
/// different components. Routers must be `Send + Sync` so one instance can
/// serve concurrent callers.
///
/// # Examples
/// ```
/// use ridepark_core::{EngineError, RideId, Router, SpatialGraph, WalkPath};
///
/// struct DirectOnly;
///
/// impl Router for DirectOnly {
///     fn find_path(
///         &self,
///         graph: &SpatialGraph,
///         from: RideId,
///         to: RideId,
///     ) -> Result<WalkPath, EngineError> {
///         WalkPath::from_rides(graph, &[from, to]).ok_or(EngineError::NoPath { from, to })
///     }
/// }
///
/// let mut graph = SpatialGraph::new();
/// graph.add_node(RideId::new(1), "Carousel");
/// graph.add_node(RideId::new(2), "Drop Tower");
/// graph.connect(RideId::new(1), RideId::new(2), 75).unwrap();
///
/// let path = DirectOnly.find_path(&graph, RideId::new(1), RideId::new(2)).unwrap();
/// assert_eq!(path.total_distance(), 75);
/// ```
pub trait Router: Send + Sync {
    /// Compute the shortest path from `from` to `to` over `graph`.
    fn find_path(
        &self,
        graph: &SpatialGraph,
        from: RideId,
        to: RideId,
    ) -> Result<WalkPath, EngineError>;
}
