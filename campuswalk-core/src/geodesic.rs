//! Great-circle distances and walking-time estimates.
//!
//! All helpers are pure. Malformed input such as `NaN` propagates through the
//! arithmetic rather than being rejected; validation belongs to the
//! [`RouteEstimator`](crate::RouteEstimator) boundary.

use geo::Coord;

use crate::config::DEFAULT_WALKING_SPEED_MPS;

/// Mean Earth radius used by the Haversine formula, in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

const SECONDS_PER_MINUTE: f64 = 60.0;

/// Build a coordinate from `(latitude, longitude)` degrees.
///
/// # Examples
/// ```
/// use campuswalk_core::lat_lng;
///
/// let gate = lat_lng(-0.3603, 37.0093);
/// assert_eq!((gate.x, gate.y), (37.0093, -0.3603));
/// ```
pub const fn lat_lng(latitude: f64, longitude: f64) -> Coord<f64> {
    Coord {
        x: longitude,
        y: latitude,
    }
}

/// Great-circle distance between `a` and `b` in metres.
///
/// Uses the Haversine formula with [`EARTH_RADIUS_M`] and the
/// `2·atan2(√h, √(1−h))` form, which stays stable near antipodal points.
///
/// # Examples
/// ```
/// use campuswalk_core::{haversine_distance, lat_lng};
///
/// let a = lat_lng(0.0, 0.0);
/// let b = lat_lng(0.001, 0.0);
/// let metres = haversine_distance(a, b);
/// assert!((100.0..=130.0).contains(&metres));
/// assert_eq!(haversine_distance(a, a), 0.0);
/// ```
pub fn haversine_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let delta_lat = (b.y - a.y).to_radians();
    let delta_lon = (b.x - a.x).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Sum of Haversine distances between consecutive points of `path`.
///
/// Paths with fewer than two points have zero length.
pub fn path_distance(path: &[Coord<f64>]) -> f64 {
    path.windows(2)
        .map(|pair| match pair {
            [from, to] => haversine_distance(*from, *to),
            _ => 0.0,
        })
        .sum()
}

/// Whole minutes needed to walk `distance_m` at `speed_mps`, rounded up.
///
/// Non-finite or non-positive results collapse to zero minutes.
///
/// # Examples
/// ```
/// use campuswalk_core::walking_minutes;
///
/// assert_eq!(walking_minutes(84.0, 1.4), 1);
/// assert_eq!(walking_minutes(1_400.0, 1.4), 17);
/// ```
pub fn walking_minutes(distance_m: f64, speed_mps: f64) -> u32 {
    // Metres per minute, so 84 m at 1.4 m/s is exactly one minute.
    let minutes = (distance_m / (speed_mps * SECONDS_PER_MINUTE)).ceil();
    if minutes.is_finite() && minutes > 0.0 {
        minutes as u32
    } else {
        0
    }
}

/// Walking minutes at the default pace of 1.4 m/s.
pub fn estimate_walking_minutes(distance_m: f64) -> u32 {
    walking_minutes(distance_m, DEFAULT_WALKING_SPEED_MPS)
}

/// Return the vertex of `path` closest to `point`.
///
/// The first vertex wins when several share the minimum distance. Returns
/// `None` for an empty path.
pub fn nearest_point_on_path(point: Coord<f64>, path: &[Coord<f64>]) -> Option<Coord<f64>> {
    let mut nearest: Option<(Coord<f64>, f64)> = None;
    for vertex in path {
        let distance = haversine_distance(point, *vertex);
        match nearest {
            Some((_, best)) if distance >= best => {}
            _ => nearest = Some((*vertex, distance)),
        }
    }
    nearest.map(|(vertex, _)| vertex)
}

/// Whether `coord` is a finite latitude/longitude within WGS84 bounds.
pub(crate) fn is_valid_coordinate(coord: Coord<f64>) -> bool {
    coord.x.is_finite()
        && coord.y.is_finite()
        && (-90.0..=90.0).contains(&coord.y)
        && (-180.0..=180.0).contains(&coord.x)
}
