//! Errors surfaced by the search and route assembly stages.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors from [`shortest_path`](crate::shortest_path).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The requested start or end identifier is not a graph node.
    #[error("node {id:?} is not part of the proximity graph")]
    UnknownNode {
        /// Identifier that failed to resolve.
        id: String,
    },
}

/// Errors from [`RouteEstimator::estimate`](crate::RouteEstimator::estimate).
///
/// Unreachable destinations and empty POI collections are not errors; they
/// degrade to a direct line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// The start or end coordinate is non-finite or outside WGS84 bounds.
    #[error("{role} coordinate (lat {latitude}, lon {longitude}) is not a valid WGS84 position")]
    InvalidCoordinate {
        /// Either `"start"` or `"end"`.
        role: &'static str,
        /// Offending latitude.
        latitude: f64,
        /// Offending longitude.
        longitude: f64,
    },
    /// A point of interest carries a non-finite or out-of-range location.
    #[error("point of interest {id:?} has an invalid location")]
    InvalidPoiLocation {
        /// Identifier of the offending POI.
        id: String,
    },
    /// The estimator configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
