//! Route command implementation for the Campuswalk CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use campuswalk_core::{
    Adjacency, EstimatorConfig, GraphConfig, NeighbourSearch, RouteEstimator, RouteResult,
    format_distance, format_minutes, lat_lng,
};
use campuswalk_data::load_pois;
use clap::{Parser, ValueEnum};
use geo::Coord;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{ARG_FROM, ARG_POIS, ARG_TO, CliError, ENV_FROM, ENV_TO};

/// How the estimated route is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum OutputFormat {
    /// Pretty-printed JSON route.
    #[default]
    Json,
    /// One-line human summary.
    Text,
}

/// Edge construction mode exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum AdjacencyArg {
    /// Keep each landmark's own nearest-neighbour list.
    Directed,
    /// Mirror every edge.
    Symmetric,
}

impl From<AdjacencyArg> for Adjacency {
    fn from(value: AdjacencyArg) -> Self {
        match value {
            AdjacencyArg::Directed => Self::Directed,
            AdjacencyArg::Symmetric => Self::Symmetric,
        }
    }
}

/// Neighbour discovery strategy exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum NeighbourSearchArg {
    /// Compare every pair of landmarks.
    Exhaustive,
    /// Prune candidates with an R*-tree first.
    Indexed,
}

impl From<NeighbourSearchArg> for NeighbourSearch {
    fn from(value: NeighbourSearchArg) -> Self {
        match value {
            NeighbourSearchArg::Exhaustive => Self::Exhaustive,
            NeighbourSearchArg::Indexed => Self::Indexed,
        }
    }
}

/// CLI arguments for the `route` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Estimate a walking route between two coordinates. When a \
                 GeoJSON file of campus landmarks is supplied the route is \
                 threaded through nearby landmarks; otherwise it is the \
                 straight line between the endpoints.",
    about = "Estimate a walking route"
)]
#[ortho_config(prefix = "CAMPUSWALK")]
pub(crate) struct RouteArgs {
    /// Start coordinate as `LAT,LON`.
    #[arg(long = ARG_FROM, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) from: Option<String>,
    /// End coordinate as `LAT,LON`.
    #[arg(long = ARG_TO, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) to: Option<String>,
    /// GeoJSON feature collection of campus landmarks.
    #[arg(long = ARG_POIS, value_name = "path")]
    #[serde(default)]
    pub(crate) pois: Option<Utf8PathBuf>,
    /// Longest edge between landmarks, in metres.
    #[arg(long = "max-radius", value_name = "metres")]
    #[serde(default)]
    pub(crate) max_radius: Option<f64>,
    /// Nearest neighbours kept per landmark.
    #[arg(long = "max-neighbours", value_name = "count")]
    #[serde(default)]
    pub(crate) max_neighbours: Option<usize>,
    /// Whether landmark edges are mirrored.
    #[arg(long, value_enum)]
    #[serde(default)]
    pub(crate) adjacency: Option<AdjacencyArg>,
    /// Neighbour discovery strategy.
    #[arg(long = "neighbour-search", value_enum)]
    #[serde(default)]
    pub(crate) neighbour_search: Option<NeighbourSearchArg>,
    /// Walking pace in metres per second.
    #[arg(long = "walking-speed", value_name = "m/s")]
    #[serde(default)]
    pub(crate) walking_speed: Option<f64>,
    /// Output format.
    #[arg(long, value_enum)]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
}

impl RouteArgs {
    pub(crate) fn into_config(self) -> Result<RouteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RouteConfig::try_from(merged)
    }
}

/// Resolved `route` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RouteConfig {
    pub(crate) from: Coord<f64>,
    pub(crate) to: Coord<f64>,
    pub(crate) pois: Option<Utf8PathBuf>,
    pub(crate) estimator: EstimatorConfig,
    pub(crate) format: OutputFormat,
}

impl RouteConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        match &self.pois {
            Some(path) => Self::require_existing(path, ARG_POIS),
            None => Ok(()),
        }
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match campuswalk_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<RouteArgs> for RouteConfig {
    type Error = CliError;

    fn try_from(args: RouteArgs) -> Result<Self, Self::Error> {
        let from = args.from.ok_or(CliError::MissingArgument {
            field: ARG_FROM,
            env: ENV_FROM,
        })?;
        let to = args.to.ok_or(CliError::MissingArgument {
            field: ARG_TO,
            env: ENV_TO,
        })?;

        let defaults = EstimatorConfig::default();
        let estimator = EstimatorConfig {
            graph: GraphConfig {
                max_radius_m: args.max_radius.unwrap_or(defaults.graph.max_radius_m),
                max_neighbours: args
                    .max_neighbours
                    .unwrap_or(defaults.graph.max_neighbours),
                adjacency: args
                    .adjacency
                    .map_or(defaults.graph.adjacency, Adjacency::from),
                neighbour_search: args
                    .neighbour_search
                    .map_or(defaults.graph.neighbour_search, NeighbourSearch::from),
            },
            walking_speed_mps: args.walking_speed.unwrap_or(defaults.walking_speed_mps),
        };
        estimator.validate()?;

        Ok(Self {
            from: parse_coordinate(ARG_FROM, &from)?,
            to: parse_coordinate(ARG_TO, &to)?,
            pois: args.pois,
            estimator,
            format: args.format.unwrap_or_default(),
        })
    }
}

/// Parse a `LAT,LON` pair. Range checks are left to the estimator.
pub(crate) fn parse_coordinate(field: &'static str, value: &str) -> Result<Coord<f64>, CliError> {
    let invalid = || CliError::InvalidCoordinate {
        field,
        value: value.to_owned(),
    };
    let (latitude, longitude) = value.split_once(',').ok_or_else(invalid)?;
    let latitude: f64 = latitude.trim().parse().map_err(|_| invalid())?;
    let longitude: f64 = longitude.trim().parse().map_err(|_| invalid())?;
    Ok(lat_lng(latitude, longitude))
}

pub(super) fn run_route(args: RouteArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_route_with(args, &mut stdout)
}

pub(super) fn run_route_with(args: RouteArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let route = estimate(&config)?;
    write_route(writer, &route, config.format)
}

fn estimate(config: &RouteConfig) -> Result<RouteResult, CliError> {
    let pois = match &config.pois {
        Some(path) => load_pois(path)?,
        None => Vec::new(),
    };
    debug!("routing over {} points of interest", pois.len());
    let estimator = RouteEstimator::with_config(config.estimator)?;
    Ok(estimator.estimate(config.from, config.to, Some(&pois))?)
}

fn write_route(
    writer: &mut dyn Write,
    route: &RouteResult,
    format: OutputFormat,
) -> Result<(), CliError> {
    let payload = match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(route).map_err(CliError::SerialiseRoute)?
        }
        OutputFormat::Text => render_text(route),
    };
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

pub(crate) fn render_text(route: &RouteResult) -> String {
    let path = if route.is_direct() {
        "direct line".to_owned()
    } else {
        format!("via {}", route.via.join(" -> "))
    };
    format!(
        "{} ({} walk), {path}",
        format_distance(route.distance_m),
        format_minutes(route.estimated_minutes)
    )
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RouteConfig, CliError> {
    let merged = RouteArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RouteConfig::try_from(merged)
}
