//! Walkway routing for Ridepark.
//!
//! This crate provides [`DijkstraRouter`], the default implementation of the
//! [`Router`](ridepark_core::Router) trait, and [`CachingRouter`], which wraps
//! any router and memoises its answers until the walkway graph changes.
//!
//! Paths minimise cumulative walkway length. The graph is not assumed to be
//! connected; rides in different components yield
//! [`EngineError::NoPath`](ridepark_core::EngineError::NoPath).

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod caching;
mod dijkstra;

pub use caching::{CachingRouter, DEFAULT_CACHE_ENTRIES};
pub use dijkstra::DijkstraRouter;
