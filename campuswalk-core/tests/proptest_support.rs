//! Proptest strategies for campus routing property tests.

use campuswalk_core::{PointOfInterest, lat_lng};
use geo::Coord;
use proptest::prelude::*;

/// Centre of the generated campus.
pub const CAMPUS_CENTRE: Coord<f64> = lat_lng(-0.3605, 37.0093);

/// Half-width of the generated area in degrees, roughly 1.1 km.
const SPREAD: f64 = 0.01;

/// Strategy for a coordinate within the generated area.
pub fn campus_coord() -> impl Strategy<Value = Coord<f64>> {
    (-SPREAD..SPREAD, -SPREAD..SPREAD)
        .prop_map(|(dy, dx)| lat_lng(CAMPUS_CENTRE.y + dy, CAMPUS_CENTRE.x + dx))
}

/// Strategy for a vector of POIs with unique identifiers.
pub fn poi_set_strategy(
    min_count: usize,
    max_count: usize,
) -> impl Strategy<Value = Vec<PointOfInterest>> {
    proptest::collection::vec(campus_coord(), min_count..=max_count).prop_map(|coords| {
        coords
            .into_iter()
            .enumerate()
            .map(|(idx, location)| PointOfInterest::unnamed(format!("poi-{idx}"), location))
            .collect()
    })
}

/// Strategy for any valid WGS84 coordinate.
pub fn global_coord() -> impl Strategy<Value = Coord<f64>> {
    (-90.0_f64..=90.0, -180.0_f64..=180.0).prop_map(|(lat, lon)| lat_lng(lat, lon))
}
