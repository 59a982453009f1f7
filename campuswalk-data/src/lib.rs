//! Data ingestion for the Campuswalk engine.
//!
//! Responsibilities:
//! - Read campus POI collections from GeoJSON files or strings.
//! - Summarise what was read so callers can report skipped features.
//!
//! Boundaries:
//! - Do not encode routing rules (live in `campuswalk-core`).
//! - File access goes through `campuswalk-fs`.

mod geojson_source;

pub use geojson_source::{
    PoiIngestReport, PoiIngestSummary, PoiLoadError, ingest_pois, load_pois, parse_pois,
};
