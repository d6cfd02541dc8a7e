//! Concurrent theme-park operations engine.
//!
//! [`Park`] owns the ride and visitor registries, the walkway graph and the
//! wait-time index, and exposes every operation a dashboard needs:
//!
//! - ride and visitor registration and removal;
//! - walkway editing;
//! - two-lane queueing with anti-starvation dispatch and ride closures;
//! - ride completion with single-step undo and per-visitor history;
//! - suggestions, wait-time listings, shortest paths and park statistics.
//!
//! Scoring and routing are injected through the
//! [`Scorer`](ridepark_core::Scorer) and [`Router`](ridepark_core::Router)
//! traits; timestamps come from a [`Clock`](ridepark_core::Clock).

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod ledger;
mod park;
mod queries;
mod queueing;
pub mod reports;

pub use config::ParkConfig;
pub use park::Park;
pub use reports::{
    BatchReport, EnqueueReceipt, ExperienceOutcome, HistoryRecord, ParkStats, PathReport, PathStop,
    QueueSnapshot, RemovedRide, RemovedVisitor, RideSummary, RideUsage, Suggestion, ToggleOutcome,
    UndoOutcome, VisitorSummary, WaitTimeEntry,
};
