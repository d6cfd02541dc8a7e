//! Memoising wrapper around any [`Router`].

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use ridepark_core::{EngineError, RideId, Router, SpatialGraph, WalkPath};

/// Default upper bound on memoised queries.
pub const DEFAULT_CACHE_ENTRIES: usize = 1024;

#[derive(Debug, Default)]
struct PathCache {
    revision: u64,
    entries: HashMap<(RideId, RideId), Result<WalkPath, EngineError>>,
}

/// [`Router`] that memoises results per `(from, to)` pair.
///
/// Entries are tagged with the graph [`revision`](SpatialGraph::revision)
/// they were computed against; a query against a newer revision drops the
/// whole cache first. When the cache is full it is cleared rather than
/// evicting entries one by one. Revisions are only comparable within one
/// graph, so each router serves a single graph.
///
/// # Examples
/// ```
/// use ridepark_core::{RideId, Router, SpatialGraph};
/// use ridepark_router::{CachingRouter, DijkstraRouter};
///
/// let mut graph = SpatialGraph::new();
/// graph.add_node(RideId::new(1), "Gate");
/// graph.add_node(RideId::new(2), "Flume");
/// graph.connect(RideId::new(1), RideId::new(2), 80).unwrap();
///
/// let router = CachingRouter::new(DijkstraRouter);
/// let first = router.find_path(&graph, RideId::new(1), RideId::new(2)).unwrap();
/// let again = router.find_path(&graph, RideId::new(1), RideId::new(2)).unwrap();
/// assert_eq!(first, again);
/// assert_eq!(router.cached_entries(), 1);
/// ```
#[derive(Debug)]
pub struct CachingRouter<R> {
    inner: R,
    max_entries: usize,
    cache: Mutex<PathCache>,
}

impl<R: Router> CachingRouter<R> {
    /// Wrap `inner` with the default cache bound.
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self::with_capacity(inner, DEFAULT_CACHE_ENTRIES)
    }

    /// Wrap `inner`, memoising at most `max_entries` queries.
    #[must_use]
    pub fn with_capacity(inner: R, max_entries: usize) -> Self {
        Self {
            inner,
            max_entries: max_entries.max(1),
            cache: Mutex::new(PathCache::default()),
        }
    }

    /// Borrow the wrapped router.
    #[must_use]
    pub const fn inner(&self) -> &R {
        &self.inner
    }

    /// Number of memoised queries.
    #[must_use]
    pub fn cached_entries(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }
}

impl<R: Router> Router for CachingRouter<R> {
    fn find_path(
        &self,
        graph: &SpatialGraph,
        from: RideId,
        to: RideId,
    ) -> Result<WalkPath, EngineError> {
        let key = (from, to);
        {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            if cache.revision != graph.revision() {
                cache.entries.clear();
                cache.revision = graph.revision();
            } else if let Some(hit) = cache.entries.get(&key) {
                log::debug!("path cache hit for {from} -> {to}");
                return hit.clone();
            }
        }

        let result = self.inner.find_path(graph, from, to);

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if cache.revision == graph.revision() {
            if cache.entries.len() >= self.max_entries {
                log::debug!("path cache full at {} entries; clearing", cache.entries.len());
                cache.entries.clear();
            }
            cache.entries.insert(key, result.clone());
        }
        result
    }
}
