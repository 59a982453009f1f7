//! GeoJSON feature collections as a POI source.

use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use campuswalk_core::{PointOfInterest, lat_lng};
use geo::{Centroid, Coord, Rect};
use geojson::{Feature, GeoJson, feature::Id};
use log::{debug, warn};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Counts and extent of a GeoJSON ingestion run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PoiIngestSummary {
    /// Number of features read.
    pub features: u64,
    /// Number of features that became points of interest.
    pub accepted: u64,
    /// Number of features skipped for missing or invalid geometry.
    pub skipped: u64,
    /// Bounding box covering every accepted location.
    /// Coordinates are WGS84 with `x = longitude`, `y = latitude`.
    pub bounds: Option<Rect<f64>>,
}

impl PoiIngestSummary {
    fn record_accepted(&mut self, location: Coord<f64>) {
        self.features += 1;
        self.accepted += 1;
        self.include(location);
    }

    fn record_skipped(&mut self) {
        self.features += 1;
        self.skipped += 1;
    }

    fn include(&mut self, location: Coord<f64>) {
        match &mut self.bounds {
            Some(existing) => {
                let min = Coord {
                    x: existing.min().x.min(location.x),
                    y: existing.min().y.min(location.y),
                };
                let max = Coord {
                    x: existing.max().x.max(location.x),
                    y: existing.max().y.max(location.y),
                };
                *existing = Rect::new(min, max);
            }
            None => self.bounds = Some(Rect::new(location, location)),
        }
    }
}

/// Detailed report of a GeoJSON ingestion run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PoiIngestReport {
    /// Feature counts and extent.
    pub summary: PoiIngestSummary,
    /// Points of interest in feature order.
    pub pois: Vec<PointOfInterest>,
}

/// Errors returned when reading a GeoJSON POI source.
#[derive(Debug, Error)]
pub enum PoiLoadError {
    /// The file could not be opened or read.
    #[error("failed to read GeoJSON file at {path}")]
    Open {
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
        /// Path that was requested.
        path: Utf8PathBuf,
    },
    /// The file was read but is not valid GeoJSON.
    #[error("failed to decode GeoJSON data{}", .path.as_ref().map(|p| format!(" at {p}")).unwrap_or_default())]
    Decode {
        /// Parser failure.
        #[source]
        source: Box<geojson::Error>,
        /// Path of the offending file, when read from disk.
        path: Option<Utf8PathBuf>,
    },
    /// The document is a bare geometry rather than features.
    #[error("expected a GeoJSON Feature or FeatureCollection, found a bare geometry")]
    NotFeatures,
}

/// Ingest POIs from a GeoJSON string.
///
/// Point features use their coordinate and other geometries their centroid.
/// The identifier comes from the `id` property, then the feature id, then
/// `feature-{index}`; the name from the `name` property, defaulting to the
/// identifier. Features without usable geometry are skipped with a warning.
///
/// # Examples
/// ```
/// use campuswalk_data::ingest_pois;
///
/// # fn main() -> Result<(), campuswalk_data::PoiLoadError> {
/// let report = ingest_pois(r#"{
///   "type": "FeatureCollection",
///   "features": [
///     {"type": "Feature", "properties": {"id": "gate", "name": "Main Gate"},
///      "geometry": {"type": "Point", "coordinates": [37.0093, -0.3603]}},
///     {"type": "Feature", "properties": {"name": "Unplaced"}, "geometry": null}
///   ]
/// }"#)?;
/// assert_eq!(report.pois.len(), 1);
/// assert_eq!(report.pois[0].name, "Main Gate");
/// assert_eq!(report.summary.skipped, 1);
/// # Ok(())
/// # }
/// ```
pub fn ingest_pois(source: &str) -> Result<PoiIngestReport, PoiLoadError> {
    let document = GeoJson::from_str(source).map_err(|source| PoiLoadError::Decode {
        source: Box::new(source),
        path: None,
    })?;
    let features = match document {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => return Err(PoiLoadError::NotFeatures),
    };

    let mut report = PoiIngestReport::default();
    for (index, feature) in features.iter().enumerate() {
        let id = feature_id(index, feature);
        match feature_location(feature) {
            Some(location) => {
                report.summary.record_accepted(location);
                let name = feature_name(feature).unwrap_or_else(|| id.clone());
                report.pois.push(PointOfInterest::new(id, name, location));
            }
            None => {
                warn!("Skipped GeoJSON feature {id:?} without a usable location");
                report.summary.record_skipped();
            }
        }
    }
    debug!(
        "Ingested {} of {} GeoJSON features",
        report.summary.accepted, report.summary.features
    );
    Ok(report)
}

/// Parse POIs from a GeoJSON string, discarding the summary.
pub fn parse_pois(source: &str) -> Result<Vec<PointOfInterest>, PoiLoadError> {
    ingest_pois(source).map(|report| report.pois)
}

/// Load POIs from a GeoJSON file.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use campuswalk_data::load_pois;
///
/// # fn main() -> Result<(), campuswalk_data::PoiLoadError> {
/// let pois = load_pois(Utf8Path::new("campus.geojson"))?;
/// println!("Loaded {} points of interest", pois.len());
/// # Ok(())
/// # }
/// ```
pub fn load_pois(path: &Utf8Path) -> Result<Vec<PointOfInterest>, PoiLoadError> {
    let source = campuswalk_fs::read_utf8_file(path).map_err(|source| PoiLoadError::Open {
        source,
        path: path.to_path_buf(),
    })?;
    match ingest_pois(&source) {
        Ok(report) => Ok(report.pois),
        Err(PoiLoadError::Decode { source, .. }) => Err(PoiLoadError::Decode {
            source,
            path: Some(path.to_path_buf()),
        }),
        Err(other) => Err(other),
    }
}

fn feature_id(index: usize, feature: &Feature) -> String {
    if let Some(label) = feature.property("id").and_then(json_label) {
        return label;
    }
    match &feature.id {
        Some(Id::String(id)) if !id.is_empty() => id.clone(),
        Some(Id::Number(number)) => number.to_string(),
        _ => format!("feature-{index}"),
    }
}

fn feature_name(feature: &Feature) -> Option<String> {
    feature.property("name").and_then(json_label)
}

fn json_label(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(text) if !text.trim().is_empty() => Some(text.clone()),
        JsonValue::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn feature_location(feature: &Feature) -> Option<Coord<f64>> {
    let geometry = geo::Geometry::<f64>::try_from(feature.geometry.clone()?).ok()?;
    let location = match geometry {
        geo::Geometry::Point(point) => point.0,
        other => other.centroid()?.0,
    };
    let valid = location.x.is_finite()
        && location.y.is_finite()
        && (-180.0..=180.0).contains(&location.x)
        && (-90.0..=90.0).contains(&location.y);
    valid.then(|| lat_lng(location.y, location.x))
}
