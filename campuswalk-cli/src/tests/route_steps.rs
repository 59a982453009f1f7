//! Behaviour-driven step definitions driving the route CLI scenarios.

use super::helpers::{CAMPUS_GEOJSON, temp_workspace, write_utf8};
use super::*;
use crate::route::run_route_with;
use camino::Utf8PathBuf;
use campuswalk_core::RouteResult;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use tempfile::TempDir;

const ENGINEERING_BUILDING: &str = "-0.3609,37.0099";
const MAIN_GATE: &str = "-0.3602,37.0092";

#[derive(Debug)]
struct RouteWorld {
    _tmp: TempDir,
    pois_path: Utf8PathBuf,
    include_pois: RefCell<bool>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl RouteWorld {
    fn new() -> Self {
        let (tmp, root) = temp_workspace();
        Self {
            _tmp: tmp,
            pois_path: root.join("campus.geojson"),
            include_pois: RefCell::new(true),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self, from: &str, to: &str) -> Vec<String> {
        let mut argv = vec![
            "campuswalk".to_owned(),
            "route".to_owned(),
            format!("--{ARG_FROM}"),
            from.to_owned(),
            format!("--{ARG_TO}"),
            to.to_owned(),
        ];
        if *self.include_pois.borrow() {
            argv.extend([format!("--{ARG_POIS}"), self.pois_path.as_str().to_owned()]);
        }
        argv
    }

    fn run(&self, from: &str, to: &str) {
        let invocation = self.build_command_line(from, to);
        let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
        let outcome = parsed.and_then(|cli| match cli.command {
            Command::Route(args) => {
                let mut buffer = self.stdout.borrow_mut();
                run_route_with(args, &mut *buffer)
            }
        });
        self.result.replace(Some(outcome));
    }

    fn printed_route(&self) -> RouteResult {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        result.as_ref().expect("expected success");
        let stdout = String::from_utf8(self.stdout.borrow().clone()).expect("stdout utf-8");
        serde_json::from_str(&stdout).expect("output should be a JSON route")
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }
}

#[fixture]
fn world() -> RouteWorld {
    RouteWorld::new()
}

#[given("a campus landmark file exists on disk")]
fn landmark_file_exists(#[from(world)] world: &RouteWorld) {
    write_utf8(&world.pois_path, CAMPUS_GEOJSON.as_bytes());
}

#[given("no landmark file is supplied")]
fn no_landmark_file(#[from(world)] world: &RouteWorld) {
    *world.include_pois.borrow_mut() = false;
}

#[given("the landmark file path points to a missing file")]
fn landmark_file_missing(#[from(world)] world: &RouteWorld) {
    *world.include_pois.borrow_mut() = true;
}

#[when("I run the route command from the main gate to the engineering building")]
fn run_gate_to_engineering(#[from(world)] world: &RouteWorld) {
    world.run(MAIN_GATE, ENGINEERING_BUILDING);
}

#[when("I run the route command from an unparseable start to the engineering building")]
fn run_malformed_start(#[from(world)] world: &RouteWorld) {
    world.run("north", ENGINEERING_BUILDING);
}

#[then("the command succeeds and prints a JSON route")]
fn command_prints_json(#[from(world)] world: &RouteWorld) {
    let route = world.printed_route();
    assert_eq!(route.route_path.first(), Some(&route.start));
    assert_eq!(route.route_path.last(), Some(&route.end));
}

#[then("the printed route passes the main gate")]
fn route_passes_gate(#[from(world)] world: &RouteWorld) {
    let route = world.printed_route();
    assert_eq!(route.via.first().map(String::as_str), Some("main-gate"));
}

#[then("the printed route is a direct line")]
fn route_is_direct(#[from(world)] world: &RouteWorld) {
    let route = world.printed_route();
    assert_eq!(route.route_path.len(), 2);
    assert!(route.via.is_empty());
}

#[then("the command fails because the landmark file is missing")]
fn fails_missing_file(#[from(world)] world: &RouteWorld) {
    match &*world.error() {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(*field, ARG_POIS);
            assert_eq!(*path, world.pois_path);
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[then("the command fails because the start coordinate is malformed")]
fn fails_malformed_start(#[from(world)] world: &RouteWorld) {
    match &*world.error() {
        CliError::InvalidCoordinate { field, value } => {
            assert_eq!(*field, ARG_FROM);
            assert_eq!(value, "north");
        }
        other => panic!("expected InvalidCoordinate, found {other:?}"),
    }
}

macro_rules! register_route_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/route_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: RouteWorld) {
            let _ = world;
        }
    };
}

register_route_scenario!(route_through_landmarks, "estimating a route through campus landmarks");
register_route_scenario!(route_without_landmarks, "estimating a direct route without landmarks");
register_route_scenario!(route_missing_landmarks, "rejecting a missing landmark file");
register_route_scenario!(route_malformed_start, "rejecting a malformed start coordinate");
