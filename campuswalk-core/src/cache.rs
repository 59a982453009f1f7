//! Reuse of a built proximity graph across estimates.
//!
//! Building the graph is quadratic in the number of POIs for the exhaustive
//! strategy. Callers that route repeatedly over the same collection can hold a
//! [`GraphCache`] and pass it to
//! [`RouteEstimator::estimate_cached`](crate::RouteEstimator::estimate_cached).
//! The cache holds a single graph keyed by a fingerprint of the POIs and the
//! graph configuration; any change to either triggers a rebuild.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use log::debug;

use crate::config::GraphConfig;
use crate::graph::{ProximityGraph, build_proximity_graph};
use crate::PointOfInterest;

#[derive(Debug, Clone)]
struct CachedGraph {
    fingerprint: u64,
    graph: ProximityGraph,
}

/// Single-entry cache of the most recently built [`ProximityGraph`].
///
/// # Examples
/// ```
/// use campuswalk_core::{GraphCache, GraphConfig, PointOfInterest, lat_lng};
///
/// let pois = vec![
///     PointOfInterest::unnamed("gate", lat_lng(-0.3603, 37.0093)),
///     PointOfInterest::unnamed("library", lat_lng(-0.3605, 37.0095)),
/// ];
/// let mut cache = GraphCache::new();
/// let nodes = cache.graph_for(&pois, &GraphConfig::default()).len();
/// assert_eq!(nodes, 2);
/// cache.graph_for(&pois, &GraphConfig::default());
/// assert_eq!((cache.hits(), cache.misses()), (1, 1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphCache {
    entry: Option<CachedGraph>,
    hits: u64,
    misses: u64,
}

impl GraphCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the graph for `pois` under `config`, building it on a miss.
    pub fn graph_for(&mut self, pois: &[PointOfInterest], config: &GraphConfig) -> &ProximityGraph {
        let fingerprint = fingerprint(pois, config);
        let fresh = self
            .entry
            .as_ref()
            .is_some_and(|cached| cached.fingerprint == fingerprint);

        if fresh {
            self.hits += 1;
            debug!("graph cache hit ({fingerprint:016x})");
        } else {
            self.misses += 1;
            debug!("graph cache miss ({fingerprint:016x}); rebuilding");
            self.entry = None;
        }

        let cached = self.entry.get_or_insert_with(|| CachedGraph {
            fingerprint,
            graph: build_proximity_graph(pois, config),
        });
        &cached.graph
    }

    /// Number of lookups served without rebuilding.
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of lookups that built a new graph.
    pub const fn misses(&self) -> u64 {
        self.misses
    }

    /// Whether a graph is currently held.
    pub const fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    /// Drop the cached graph. Counters are kept.
    pub fn clear(&mut self) {
        self.entry = None;
    }
}

fn fingerprint(pois: &[PointOfInterest], config: &GraphConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    pois.len().hash(&mut hasher);
    for poi in pois {
        poi.id.hash(&mut hasher);
        poi.name.hash(&mut hasher);
        poi.location.x.to_bits().hash(&mut hasher);
        poi.location.y.to_bits().hash(&mut hasher);
    }
    config.max_radius_m.to_bits().hash(&mut hasher);
    config.max_neighbours.hash(&mut hasher);
    config.adjacency.hash(&mut hasher);
    config.neighbour_search.hash(&mut hasher);
    hasher.finish()
}
