//! Single-source shortest paths with a binary heap.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use ridepark_core::{EngineError, RideId, Router, SpatialGraph, WalkPath};

/// [`Router`] running Dijkstra's algorithm over walkway lengths.
///
/// The search stops as soon as the destination is settled. Heap entries are
/// ordered by `(distance, ride_id)`, so equal-length alternatives resolve the
/// same way on every call.
///
/// # Examples
/// ```
/// use ridepark_core::{RideId, Router, SpatialGraph};
/// use ridepark_router::DijkstraRouter;
///
/// let mut graph = SpatialGraph::new();
/// for (raw, name) in [(1, "Gate"), (2, "Flume"), (3, "Carousel")] {
///     graph.add_node(RideId::new(raw), name);
/// }
/// graph.connect(RideId::new(1), RideId::new(2), 50).unwrap();
/// graph.connect(RideId::new(2), RideId::new(3), 50).unwrap();
/// graph.connect(RideId::new(1), RideId::new(3), 140).unwrap();
///
/// let path = DijkstraRouter.find_path(&graph, RideId::new(1), RideId::new(3)).unwrap();
/// assert_eq!(path.total_distance(), 100);
/// assert_eq!(path.hops().len(), 3);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn find_path(
        &self,
        graph: &SpatialGraph,
        from: RideId,
        to: RideId,
    ) -> Result<WalkPath, EngineError> {
        if !graph.contains(from) {
            return Err(EngineError::ride_not_found(from));
        }
        if !graph.contains(to) {
            return Err(EngineError::ride_not_found(to));
        }
        let rides = shortest_rides(graph, from, to).ok_or(EngineError::NoPath { from, to })?;
        WalkPath::from_rides(graph, &rides).ok_or(EngineError::NoPath { from, to })
    }
}

fn shortest_rides(graph: &SpatialGraph, from: RideId, to: RideId) -> Option<Vec<RideId>> {
    let mut best: HashMap<RideId, u64> = HashMap::new();
    let mut previous: HashMap<RideId, RideId> = HashMap::new();
    let mut heap: BinaryHeap<Reverse<(u64, RideId)>> = BinaryHeap::new();

    best.insert(from, 0);
    heap.push(Reverse((0, from)));

    while let Some(Reverse((distance, ride))) = heap.pop() {
        if ride == to {
            return Some(unwind(&previous, from, to));
        }
        if best.get(&ride).is_some_and(|known| distance > *known) {
            continue;
        }
        for (neighbour, length) in graph.neighbours(ride) {
            let candidate = distance.saturating_add(u64::from(length));
            let improved = best.get(&neighbour).is_none_or(|known| candidate < *known);
            if improved {
                best.insert(neighbour, candidate);
                previous.insert(neighbour, ride);
                heap.push(Reverse((candidate, neighbour)));
            }
        }
    }
    None
}

fn unwind(previous: &HashMap<RideId, RideId>, from: RideId, to: RideId) -> Vec<RideId> {
    let mut rides = vec![to];
    let mut cursor = to;
    while cursor != from {
        let Some(step) = previous.get(&cursor) else {
            break;
        };
        rides.push(*step);
        cursor = *step;
    }
    rides.reverse();
    rides
}
