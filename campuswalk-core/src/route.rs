//! Route assembly: snap, search, stitch, fall back.
//!
//! [`RouteEstimator`] is the public entry point. It snaps arbitrary start and
//! end coordinates to their nearest POIs, searches the proximity graph between
//! them and returns a coordinate path whose reported distance always matches
//! the path itself.

use geo::Coord;
use log::{debug, warn};

use crate::cache::GraphCache;
use crate::config::{ConfigError, EstimatorConfig};
use crate::error::RouteError;
use crate::geodesic::{is_valid_coordinate, path_distance, walking_minutes};
use crate::graph::{ProximityGraph, build_proximity_graph};
use crate::search::shortest_path;
use crate::PointOfInterest;

/// Outcome of a route estimate.
///
/// `route_path` begins at `start` and ends at `end`. When no graph path was
/// used it is exactly `[start, end]` and `via` is empty.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteResult {
    /// Sum of great-circle distances along `route_path`, in metres.
    pub distance_m: f64,
    /// Walking time derived from `distance_m`, rounded up to whole minutes.
    pub estimated_minutes: u32,
    /// The requested start coordinate.
    pub start: Coord<f64>,
    /// The requested end coordinate.
    pub end: Coord<f64>,
    /// Ordered coordinates a walker passes through.
    pub route_path: Vec<Coord<f64>>,
    /// Identifiers of the POIs the route passes, in order.
    pub via: Vec<String>,
}

impl RouteResult {
    fn along(
        start: Coord<f64>,
        end: Coord<f64>,
        route_path: Vec<Coord<f64>>,
        via: Vec<String>,
        walking_speed_mps: f64,
    ) -> Self {
        let distance_m = path_distance(&route_path);
        Self {
            distance_m,
            estimated_minutes: walking_minutes(distance_m, walking_speed_mps),
            start,
            end,
            route_path,
            via,
        }
    }

    fn direct(start: Coord<f64>, end: Coord<f64>, walking_speed_mps: f64) -> Self {
        Self::along(start, end, vec![start, end], Vec::new(), walking_speed_mps)
    }

    /// Whether the route is a straight line without graph waypoints.
    pub fn is_direct(&self) -> bool {
        self.via.is_empty()
    }
}

/// Estimates walking routes across a campus.
///
/// # Examples
/// ```
/// use campuswalk_core::{RouteEstimator, lat_lng, test_support::campus_pois};
///
/// # fn main() -> Result<(), campuswalk_core::RouteError> {
/// let estimator = RouteEstimator::default();
/// let start = lat_lng(-0.3602, 37.0092);
/// let end = lat_lng(-0.3609, 37.0099);
/// let route = estimator.estimate(start, end, Some(&campus_pois()))?;
///
/// assert_eq!(route.route_path.first(), Some(&start));
/// assert_eq!(route.route_path.last(), Some(&end));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteEstimator {
    config: EstimatorConfig,
}

impl RouteEstimator {
    /// Construct an estimator after validating `config`.
    pub fn with_config(config: EstimatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub const fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimate a route from `start` to `end`, optionally through `pois`.
    ///
    /// Without POIs, or with an empty collection, the route is the direct
    /// line. Otherwise a proximity graph is built fresh for this call.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidCoordinate`] for a non-finite or
    /// out-of-range endpoint and [`RouteError::InvalidPoiLocation`] for a POI
    /// with such a location.
    pub fn estimate(
        &self,
        start: Coord<f64>,
        end: Coord<f64>,
        pois: Option<&[PointOfInterest]>,
    ) -> Result<RouteResult, RouteError> {
        validate_endpoints(start, end)?;
        let Some(pois) = pois.filter(|pois| !pois.is_empty()) else {
            return Ok(self.direct(start, end));
        };
        validate_pois(pois)?;
        let graph = build_proximity_graph(pois, &self.config.graph);
        Ok(self.route_through(&graph, start, end))
    }

    /// Estimate a route over a caller-supplied graph.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidCoordinate`] for a non-finite or
    /// out-of-range endpoint.
    pub fn estimate_on_graph(
        &self,
        graph: &ProximityGraph,
        start: Coord<f64>,
        end: Coord<f64>,
    ) -> Result<RouteResult, RouteError> {
        validate_endpoints(start, end)?;
        Ok(self.route_through(graph, start, end))
    }

    /// Estimate a route, reusing the graph held by `cache` when the POI
    /// collection and graph configuration are unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`RouteEstimator::estimate`].
    pub fn estimate_cached(
        &self,
        cache: &mut GraphCache,
        start: Coord<f64>,
        end: Coord<f64>,
        pois: &[PointOfInterest],
    ) -> Result<RouteResult, RouteError> {
        validate_endpoints(start, end)?;
        if pois.is_empty() {
            return Ok(self.direct(start, end));
        }
        validate_pois(pois)?;
        let graph = cache.graph_for(pois, &self.config.graph);
        Ok(self.route_through(graph, start, end))
    }

    fn direct(&self, start: Coord<f64>, end: Coord<f64>) -> RouteResult {
        RouteResult::direct(start, end, self.config.walking_speed_mps)
    }

    fn route_through(
        &self,
        graph: &ProximityGraph,
        start: Coord<f64>,
        end: Coord<f64>,
    ) -> RouteResult {
        let (Some(origin), Some(destination)) = (graph.nearest_node(start), graph.nearest_node(end))
        else {
            return self.direct(start, end);
        };

        let path = match shortest_path(graph, &origin.poi.id, &destination.poi.id) {
            Ok(Some(path)) if path.nodes.len() > 1 => path,
            Ok(Some(_)) => {
                debug!(
                    "start and end both snap to {:?}; using a direct line",
                    origin.poi.id
                );
                return self.direct(start, end);
            }
            Ok(None) => {
                debug!(
                    "no graph path from {:?} to {:?}; using a direct line",
                    origin.poi.id, destination.poi.id
                );
                return self.direct(start, end);
            }
            Err(err) => {
                warn!("{err}; using a direct line");
                return self.direct(start, end);
            }
        };

        let mut route_path = Vec::with_capacity(path.nodes.len() + 2);
        route_path.push(start);
        route_path.extend(
            path.nodes
                .iter()
                .filter_map(|id| graph.node(id).map(|node| node.poi.location)),
        );
        route_path.push(end);
        RouteResult::along(
            start,
            end,
            route_path,
            path.nodes,
            self.config.walking_speed_mps,
        )
    }
}

/// Estimate a route with the default configuration.
///
/// # Errors
///
/// Same as [`RouteEstimator::estimate`].
///
/// # Examples
/// ```
/// use campuswalk_core::{calculate_route, haversine_distance, lat_lng};
///
/// # fn main() -> Result<(), campuswalk_core::RouteError> {
/// let start = lat_lng(-0.3603, 37.0093);
/// let end = lat_lng(-0.3610, 37.0090);
/// let route = calculate_route(start, end, None)?;
/// assert_eq!(route.route_path, vec![start, end]);
/// assert_eq!(route.distance_m, haversine_distance(start, end));
/// # Ok(())
/// # }
/// ```
pub fn calculate_route(
    start: Coord<f64>,
    end: Coord<f64>,
    pois: Option<&[PointOfInterest]>,
) -> Result<RouteResult, RouteError> {
    RouteEstimator::default().estimate(start, end, pois)
}

fn validate_endpoints(start: Coord<f64>, end: Coord<f64>) -> Result<(), RouteError> {
    for (role, coord) in [("start", start), ("end", end)] {
        if !is_valid_coordinate(coord) {
            return Err(RouteError::InvalidCoordinate {
                role,
                latitude: coord.y,
                longitude: coord.x,
            });
        }
    }
    Ok(())
}

fn validate_pois(pois: &[PointOfInterest]) -> Result<(), RouteError> {
    match pois.iter().find(|poi| !is_valid_coordinate(poi.location)) {
        Some(poi) => Err(RouteError::InvalidPoiLocation { id: poi.id.clone() }),
        None => Ok(()),
    }
}
