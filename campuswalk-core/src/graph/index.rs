//! R*-tree candidate pruning for graph construction.
//!
//! The tree stores raw `[longitude, latitude]` pairs. Envelope queries return
//! a superset of the POIs within a Haversine radius; callers still filter by
//! exact distance.

use std::f64::consts::PI;

use geo::Coord;
use rstar::{AABB, RTree, primitives::GeomWithData};

use super::GraphNode;
use crate::geodesic::EARTH_RADIUS_M;

type IndexedPoint = GeomWithData<[f64; 2], usize>;

const METRES_PER_DEGREE: f64 = EARTH_RADIUS_M * PI / 180.0;

/// Widening applied to the envelope so that curvature never drops a
/// neighbour near the cutoff.
const ENVELOPE_MARGIN: f64 = 1.1;

/// Beyond this longitude span the envelope covers every meridian.
const FULL_SPAN_DEGREES: f64 = 90.0;

pub(super) struct CandidateIndex {
    tree: RTree<IndexedPoint>,
}

impl CandidateIndex {
    pub(super) fn new(nodes: &[GraphNode]) -> Self {
        let points = nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.poi.location.x.is_finite() && node.poi.location.y.is_finite())
            .map(|(position, node)| {
                GeomWithData::new([node.poi.location.x, node.poi.location.y], position)
            })
            .collect();
        Self {
            tree: RTree::bulk_load(points),
        }
    }

    /// Positions of nodes that may lie within `radius_m` of `centre`.
    pub(super) fn candidates_within(&self, centre: Coord<f64>, radius_m: f64) -> Vec<usize> {
        let Some(envelope) = search_envelope(centre, radius_m) else {
            return Vec::new();
        };
        self.tree
            .locate_in_envelope(&envelope)
            .map(|point| point.data)
            .collect()
    }
}

fn search_envelope(centre: Coord<f64>, radius_m: f64) -> Option<AABB<[f64; 2]>> {
    if !(centre.x.is_finite() && centre.y.is_finite() && radius_m.is_finite()) {
        return None;
    }
    let lat_span = radius_m / METRES_PER_DEGREE * ENVELOPE_MARGIN;
    let widest_lat = (centre.y.abs() + lat_span).min(90.0);
    let parallel_scale = widest_lat.to_radians().cos();
    let lon_span = if parallel_scale > f64::EPSILON {
        radius_m / (METRES_PER_DEGREE * parallel_scale) * ENVELOPE_MARGIN
    } else {
        f64::INFINITY
    };
    let lon_span = if lon_span > FULL_SPAN_DEGREES {
        360.0
    } else {
        lon_span
    };
    Some(AABB::from_corners(
        [centre.x - lon_span, centre.y - lat_span],
        [centre.x + lon_span, centre.y + lat_span],
    ))
}
