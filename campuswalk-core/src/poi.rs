use geo::Coord;

/// A named campus location used both as a search target and a graph node.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use campuswalk_core::{PointOfInterest, lat_lng};
///
/// let library = PointOfInterest::new("library", "Main Library", lat_lng(-0.3605, 37.0095));
///
/// assert_eq!(library.id, "library");
/// assert_eq!(library.latitude(), -0.3605);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointOfInterest {
    /// Unique identifier.
    pub id: String,
    /// Display name shown to visitors.
    pub name: String,
    /// Geospatial position.
    pub location: Coord<f64>,
}

impl PointOfInterest {
    /// Construct a `PointOfInterest` from its parts.
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
        }
    }

    /// Construct a `PointOfInterest` whose display name is its identifier.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use campuswalk_core::PointOfInterest;
    ///
    /// let gate = PointOfInterest::unnamed("gate", Coord { x: 37.0093, y: -0.3603 });
    /// assert_eq!(gate.name, "gate");
    /// ```
    pub fn unnamed(id: impl Into<String>, location: Coord<f64>) -> Self {
        let identifier: String = id.into();
        Self {
            name: identifier.clone(),
            id: identifier,
            location,
        }
    }

    /// Latitude in degrees.
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }
}
