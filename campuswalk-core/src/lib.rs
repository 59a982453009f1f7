//! Core routing estimation for the Campuswalk engine.
//!
//! The crate turns a read-only collection of campus points of interest into a
//! proximity graph, searches it for the shortest walk between two snapped
//! endpoints and assembles a coordinate path with a walking-time estimate.
//!
//! Coordinates are WGS84 [`geo::Coord`] values with `x = longitude` and
//! `y = latitude`. Every call is self-contained: graphs are built fresh unless
//! the caller opts into a [`GraphCache`].

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cache;
pub mod config;
mod error;
pub mod format;
pub mod geodesic;
pub mod graph;
mod poi;
pub mod route;
pub mod search;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use cache::GraphCache;
pub use config::{
    Adjacency, ConfigError, DEFAULT_MAX_NEIGHBOURS, DEFAULT_MAX_RADIUS_M,
    DEFAULT_WALKING_SPEED_MPS, EstimatorConfig, GraphConfig, NeighbourSearch,
};
pub use error::{RouteError, SearchError};
pub use format::{format_distance, format_minutes};
pub use geodesic::{
    EARTH_RADIUS_M, estimate_walking_minutes, haversine_distance, lat_lng,
    nearest_point_on_path, path_distance, walking_minutes,
};
pub use graph::{Edge, GraphNode, ProximityGraph, build_proximity_graph};
pub use poi::PointOfInterest;
pub use route::{RouteEstimator, RouteResult, calculate_route};
pub use search::{GraphPath, shortest_path};
