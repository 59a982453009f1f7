//! Test helpers for writing landmark files into temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Five landmarks within a couple of hundred metres of each other.
pub(super) const CAMPUS_GEOJSON: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "properties": {"id": "main-gate", "name": "Main Gate"},
     "geometry": {"type": "Point", "coordinates": [37.0093, -0.3603]}},
    {"type": "Feature", "properties": {"id": "main-library", "name": "Main Library"},
     "geometry": {"type": "Point", "coordinates": [37.0095, -0.3605]}},
    {"type": "Feature", "properties": {"id": "engineering-building", "name": "Engineering Building"},
     "geometry": {"type": "Point", "coordinates": [37.0098, -0.3608]}},
    {"type": "Feature", "properties": {"id": "student-center", "name": "Student Center"},
     "geometry": {"type": "Point", "coordinates": [37.0090, -0.3610]}},
    {"type": "Feature", "properties": {"id": "sports-complex", "name": "Sports Complex"},
     "geometry": {"type": "Point", "coordinates": [37.0085, -0.3600]}}
  ]
}"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).expect("write fixture");
}

pub(super) fn temp_workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}
