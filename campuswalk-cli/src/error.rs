//! Error types emitted by the Campuswalk CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use campuswalk_core::{ConfigError, RouteError};
use campuswalk_data::PoiLoadError;
use thiserror::Error;

/// Errors emitted by the Campuswalk CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A coordinate option is not a `LAT,LON` pair.
    #[error("--{field} expects LAT,LON in decimal degrees, got {value:?}")]
    InvalidCoordinate { field: &'static str, value: String },
    /// The merged tuning options were rejected.
    #[error("invalid routing options: {0}")]
    InvalidOptions(#[from] ConfigError),
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Reading the POI file failed.
    #[error("failed to load points of interest: {0}")]
    LoadPois(#[from] PoiLoadError),
    /// The estimator rejected the request.
    #[error("route estimation failed: {0}")]
    Route(#[from] RouteError),
    /// Serialising the route failed.
    #[error("failed to serialise route: {0}")]
    SerialiseRoute(#[source] serde_json::Error),
    /// Writing the route output failed.
    #[error("failed to write route output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
