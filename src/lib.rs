//! Facade crate for the Campuswalk routing engine.
//!
//! This crate re-exports the core routing types and exposes GeoJSON landmark
//! loading behind a feature flag.

#![forbid(unsafe_code)]

pub use campuswalk_core::{
    Adjacency, ConfigError, EstimatorConfig, GraphCache, GraphConfig, NeighbourSearch,
    PointOfInterest, ProximityGraph, RouteError, RouteEstimator, RouteResult, SearchError,
    build_proximity_graph, calculate_route, format_distance, format_minutes, haversine_distance,
    lat_lng, shortest_path,
};

#[cfg(feature = "geojson")]
pub use campuswalk_data::{PoiLoadError, load_pois, parse_pois};
