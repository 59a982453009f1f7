//! Tuning knobs for graph construction and route estimation.

use thiserror::Error;

/// Neighbours further than this are never connected, in metres.
pub const DEFAULT_MAX_RADIUS_M: f64 = 500.0;

/// Each POI keeps at most this many nearest neighbours.
pub const DEFAULT_MAX_NEIGHBOURS: usize = 5;

/// Average walking pace, roughly 5 km/h.
pub const DEFAULT_WALKING_SPEED_MPS: f64 = 1.4;

/// How nearest-neighbour lists become graph edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Adjacency {
    /// Each node keeps only its own nearest-K list, so `A -> B` does not imply
    /// `B -> A`.
    #[default]
    Directed,
    /// Every edge is mirrored. Lists are re-sorted and may exceed the cap.
    Symmetric,
}

/// Candidate discovery strategy used while building the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NeighbourSearch {
    /// Compare every pair of POIs.
    #[default]
    Exhaustive,
    /// Prune candidates with an R*-tree envelope query first.
    ///
    /// Regions straddling the antimeridian are not modelled.
    Indexed,
}

/// Parameters for [`build_proximity_graph`](crate::build_proximity_graph).
///
/// # Examples
/// ```
/// use campuswalk_core::{Adjacency, GraphConfig};
///
/// let config = GraphConfig {
///     adjacency: Adjacency::Symmetric,
///     ..GraphConfig::default()
/// };
/// assert_eq!(config.max_neighbours, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraphConfig {
    /// Maximum edge length in metres (inclusive).
    pub max_radius_m: f64,
    /// Maximum number of nearest neighbours kept per node.
    pub max_neighbours: usize,
    /// Whether edges are mirrored.
    pub adjacency: Adjacency,
    /// Candidate discovery strategy.
    pub neighbour_search: NeighbourSearch,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_radius_m: DEFAULT_MAX_RADIUS_M,
            max_neighbours: DEFAULT_MAX_NEIGHBOURS,
            adjacency: Adjacency::Directed,
            neighbour_search: NeighbourSearch::Exhaustive,
        }
    }
}

impl GraphConfig {
    /// Reject radii and caps that cannot produce a meaningful graph.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_radius_m.is_finite() || self.max_radius_m <= 0.0 {
            return Err(ConfigError::InvalidRadius(self.max_radius_m));
        }
        if self.max_neighbours == 0 {
            return Err(ConfigError::ZeroNeighbours);
        }
        Ok(())
    }
}

/// Parameters for [`RouteEstimator`](crate::RouteEstimator).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EstimatorConfig {
    /// Proximity graph parameters.
    pub graph: GraphConfig,
    /// Walking pace in metres per second.
    pub walking_speed_mps: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            graph: GraphConfig::default(),
            walking_speed_mps: DEFAULT_WALKING_SPEED_MPS,
        }
    }
}

impl EstimatorConfig {
    /// Validate the graph parameters and the walking pace.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.graph.validate()?;
        if !self.walking_speed_mps.is_finite() || self.walking_speed_mps <= 0.0 {
            return Err(ConfigError::InvalidWalkingSpeed(self.walking_speed_mps));
        }
        Ok(())
    }
}

/// Errors returned by [`GraphConfig::validate`] and
/// [`EstimatorConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// The neighbour radius was non-finite or not positive.
    #[error("maximum neighbour radius must be a positive number of metres, got {0}")]
    InvalidRadius(f64),
    /// The neighbour cap was zero.
    #[error("maximum neighbour count must be at least 1")]
    ZeroNeighbours,
    /// The walking speed was non-finite or not positive.
    #[error("walking speed must be a positive number of metres per second, got {0}")]
    InvalidWalkingSpeed(f64),
}
