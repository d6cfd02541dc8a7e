//! Facade crate for the Ridepark theme-park engine.
//!
//! This crate re-exports the core domain types and the concurrent [`Park`]
//! engine, and exposes the default scorer and router behind feature flags.

#![forbid(unsafe_code)]

pub use ridepark_core::{
    Clock, Dispatch, Edge, EngineError, EntityKind, Lane, NewRide, NewVisitor, RideId, Router,
    Satisfaction, Scorer, SpatialGraph, SystemClock, ThrillLevel, TicketType, VisitorId, WalkPath,
};
pub use ridepark_runtime::{Park, ParkConfig, reports};

#[cfg(feature = "scorer-thrill")]
pub use ridepark_scorer::{SatisfactionWeights, ScoreWeights, ScoreWeightsError, ThrillScorer};

#[cfg(feature = "router-dijkstra")]
pub use ridepark_router::{CachingRouter, DijkstraRouter};

/// Park wired with the thrill scorer and a cached Dijkstra router.
#[cfg(all(feature = "scorer-thrill", feature = "router-dijkstra"))]
pub type DefaultPark = Park<ThrillScorer, CachingRouter<DijkstraRouter>>;

#[cfg(feature = "test-support")]
pub use ridepark_core::test_support;
