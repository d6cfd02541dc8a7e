//! Core domain types for the Ridepark engine.
//!
//! These models validate their inputs on construction so downstream
//! components never see an out-of-range thrill level, a zero-capacity ride or
//! a visitor id below the reserved range. Constructors return `Result` to
//! surface invalid input early.
//!
//! The crate also hosts the leaf data structures every engine component is
//! built from: the walkway [`SpatialGraph`], the [`WaitTimeIndex`], the
//! per-ride [`QueueState`] and the per-visitor [`RideHistory`], plus the
//! [`Scorer`] and [`Router`] seams implemented by sibling crates.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod clock;
mod error;
pub mod graph;
mod history;
mod ids;
mod queue;
mod ride;
mod router;
mod satisfaction;
mod scorer;
mod visitor;
mod wait_index;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use clock::{Clock, SystemClock};
pub use error::{EngineError, EntityKind};
pub use graph::{Edge, SpatialGraph};
pub use history::{DEFAULT_HISTORY_BOUND, HistoryEntry, RideHistory};
pub use ids::{RideId, ThrillLevel, VisitorId};
pub use queue::{Dispatch, Lane, QueueState};
pub use ride::{NewRide, Ride};
pub use router::{PathHop, Router, WalkPath};
pub use satisfaction::{Satisfaction, SatisfactionDelta};
pub use scorer::{MAX_THRILL_MATCH, RankedRide, Scorer, rank_rides};
pub use visitor::{NewVisitor, RideRecord, TicketType, Visitor};
pub use wait_index::{IndexedRide, WaitTimeIndex};
