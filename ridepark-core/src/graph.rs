//! Undirected walkway graph between rides.
//!
//! Nodes are rides, keyed by [`RideId`], and carry the ride's display name so
//! path reports can be resolved from the graph alone. Edges are symmetric
//! walkways with a positive integer length in metres.
//!
//! Every mutation bumps [`SpatialGraph::revision`], which lets routers cache
//! results and discard them once the layout changes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{EngineError, RideId};

/// A walkway between two rides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// One end of the walkway.
    pub from: RideId,
    /// The other end of the walkway.
    pub to: RideId,
    /// Walking distance in metres.
    pub distance: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    name: String,
    edges: BTreeMap<RideId, u32>,
}

/// Undirected weighted graph of rides and walkways.
///
/// # Examples
/// ```
/// use ridepark_core::{RideId, SpatialGraph};
///
/// let mut graph = SpatialGraph::new();
/// graph.add_node(RideId::new(1), "Gate Coaster");
/// graph.add_node(RideId::new(2), "Log Flume");
/// graph.connect(RideId::new(1), RideId::new(2), 120).unwrap();
///
/// assert_eq!(graph.distance(RideId::new(2), RideId::new(1)), Some(120));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpatialGraph {
    nodes: BTreeMap<RideId, Node>,
    revision: u64,
}

impl SpatialGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Monotonic counter bumped by every mutation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Insert a node, or rename it if it already exists.
    ///
    /// Existing walkways are kept.
    pub fn add_node(&mut self, ride: RideId, name: impl Into<String>) {
        let name = name.into();
        self.nodes
            .entry(ride)
            .and_modify(|node| node.name.clone_from(&name))
            .or_insert_with(|| Node {
                name,
                edges: BTreeMap::new(),
            });
        self.bump();
    }

    /// Remove a node together with every walkway touching it.
    ///
    /// Returns `false` when the node was absent.
    pub fn remove_node(&mut self, ride: RideId) -> bool {
        let Some(node) = self.nodes.remove(&ride) else {
            return false;
        };
        for neighbour in node.edges.keys() {
            if let Some(other) = self.nodes.get_mut(neighbour) {
                other.edges.remove(&ride);
            }
        }
        self.bump();
        true
    }

    /// Add or replace the walkway between `a` and `b`.
    ///
    /// # Errors
    /// Returns [`EngineError::NotFound`] when either ride is not a node and
    /// [`EngineError::InvalidInput`] for self-loops or a zero distance.
    pub fn connect(&mut self, a: RideId, b: RideId, distance: u32) -> Result<(), EngineError> {
        if a == b {
            return Err(EngineError::invalid_input(
                "walkway",
                format!("ride {a} cannot be connected to itself"),
            ));
        }
        if distance == 0 {
            return Err(EngineError::invalid_input(
                "distance",
                "walkway length must be positive",
            ));
        }
        self.require(a)?;
        self.require(b)?;
        if let Some(node) = self.nodes.get_mut(&a) {
            node.edges.insert(b, distance);
        }
        if let Some(node) = self.nodes.get_mut(&b) {
            node.edges.insert(a, distance);
        }
        self.bump();
        Ok(())
    }

    /// Remove the walkway between `a` and `b`.
    ///
    /// Returns `false` when no such walkway existed.
    pub fn disconnect(&mut self, a: RideId, b: RideId) -> bool {
        let removed = self
            .nodes
            .get_mut(&a)
            .and_then(|node| node.edges.remove(&b))
            .is_some();
        if let Some(node) = self.nodes.get_mut(&b) {
            node.edges.remove(&a);
        }
        if removed {
            self.bump();
        }
        removed
    }

    /// Whether `ride` is a node.
    #[must_use]
    pub fn contains(&self, ride: RideId) -> bool {
        self.nodes.contains_key(&ride)
    }

    /// Display name stored for `ride`.
    #[must_use]
    pub fn name(&self, ride: RideId) -> Option<&str> {
        self.nodes.get(&ride).map(|node| node.name.as_str())
    }

    /// Neighbours of `ride` with walkway lengths, ascending by ride id.
    ///
    /// Yields nothing for unknown rides.
    pub fn neighbours(&self, ride: RideId) -> impl Iterator<Item = (RideId, u32)> + '_ {
        self.nodes
            .get(&ride)
            .into_iter()
            .flat_map(|node| node.edges.iter().map(|(id, distance)| (*id, *distance)))
    }

    /// Length of the direct walkway between `a` and `b`.
    #[must_use]
    pub fn distance(&self, a: RideId, b: RideId) -> Option<u32> {
        self.nodes.get(&a)?.edges.get(&b).copied()
    }

    /// Node identifiers in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = RideId> + '_ {
        self.nodes.keys().copied()
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Every walkway once, with `from < to`.
    #[must_use]
    pub fn edges(&self) -> Vec<Edge> {
        self.nodes
            .iter()
            .flat_map(|(from, node)| {
                node.edges
                    .iter()
                    .filter(move |(to, _)| *from < **to)
                    .map(move |(to, distance)| Edge {
                        from: *from,
                        to: *to,
                        distance: *distance,
                    })
            })
            .collect()
    }

    fn require(&self, ride: RideId) -> Result<(), EngineError> {
        if self.contains(ride) {
            Ok(())
        } else {
            Err(EngineError::ride_not_found(ride))
        }
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
