//! Small, deterministic POI fixtures shared by unit, behaviour and
//! documentation tests.

use crate::geodesic::lat_lng;
use crate::PointOfInterest;

/// Create an unnamed point of interest at `(latitude, longitude)`.
///
/// The name defaults to the identifier.
pub fn poi(id: &str, latitude: f64, longitude: f64) -> PointOfInterest {
    PointOfInterest::unnamed(id, lat_lng(latitude, longitude))
}

/// Five landmarks within roughly 150 metres of each other.
///
/// Every pair lies inside the default radius, so with the default cap of five
/// neighbours the resulting graph is complete.
pub fn campus_pois() -> Vec<PointOfInterest> {
    vec![
        PointOfInterest::new("main-gate", "Main Gate", lat_lng(-0.3603, 37.0093)),
        PointOfInterest::new("main-library", "Main Library", lat_lng(-0.3605, 37.0095)),
        PointOfInterest::new(
            "engineering-building",
            "Engineering Building",
            lat_lng(-0.3608, 37.0098),
        ),
        PointOfInterest::new("student-center", "Student Center", lat_lng(-0.3610, 37.0090)),
        PointOfInterest::new("sports-complex", "Sports Complex", lat_lng(-0.3600, 37.0085)),
    ]
}

/// Two tight groups of three POIs about 11 km apart on the equator.
///
/// The `west-*` group sits at longitude 0 and the `east-*` group at longitude
/// 0.1, so no edge ever joins them under the default radius.
pub fn two_clusters() -> Vec<PointOfInterest> {
    vec![
        poi("west-a", 0.0, 0.0),
        poi("west-b", 0.001, 0.0),
        poi("west-c", 0.0, 0.001),
        poi("east-a", 0.0, 0.1),
        poi("east-b", 0.001, 0.1),
        poi("east-c", 0.0, 0.101),
    ]
}
