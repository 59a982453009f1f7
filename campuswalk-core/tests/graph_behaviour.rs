//! Behavioural tests for proximity graph construction.

use campuswalk_core::test_support::{campus_pois, poi};
use campuswalk_core::{GraphConfig, PointOfInterest, ProximityGraph, build_proximity_graph};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

#[fixture]
fn pois() -> RefCell<Vec<PointOfInterest>> {
    RefCell::new(Vec::new())
}

#[fixture]
fn graph() -> RefCell<Option<ProximityGraph>> {
    RefCell::new(None)
}

fn built(graph: &RefCell<Option<ProximityGraph>>) -> ProximityGraph {
    graph.borrow().clone().expect("graph built")
}

#[given("the campus landmarks")]
fn given_campus(#[from(pois)] pois: &RefCell<Vec<PointOfInterest>>) {
    *pois.borrow_mut() = campus_pois();
}

#[given("an observatory far beyond walking range")]
fn given_observatory(#[from(pois)] pois: &RefCell<Vec<PointOfInterest>>) {
    pois.borrow_mut().push(poi("observatory", -0.36, 37.5));
}

#[given("a row of 8 landmarks about eleven metres apart")]
fn given_row(#[from(pois)] pois: &RefCell<Vec<PointOfInterest>>) {
    *pois.borrow_mut() = (0..8)
        .map(|i| poi(&format!("stop{i}"), 0.0001 * f64::from(i), 0.0))
        .collect();
}

#[when("I build the proximity graph")]
fn when_build(
    #[from(pois)] pois: &RefCell<Vec<PointOfInterest>>,
    #[from(graph)] graph: &RefCell<Option<ProximityGraph>>,
) {
    *graph.borrow_mut() = Some(build_proximity_graph(
        &pois.borrow(),
        &GraphConfig::default(),
    ));
}

#[then("every landmark has 4 neighbours")]
fn then_four(#[from(graph)] graph: &RefCell<Option<ProximityGraph>>) {
    let graph = built(graph);
    assert!(graph.nodes().iter().all(|node| node.neighbours.len() == 4));
}

#[then("every landmark has 5 neighbours")]
fn then_five(#[from(graph)] graph: &RefCell<Option<ProximityGraph>>) {
    let graph = built(graph);
    assert!(graph.nodes().iter().all(|node| node.neighbours.len() == 5));
}

#[then("each neighbour list is sorted by distance")]
fn then_sorted(#[from(graph)] graph: &RefCell<Option<ProximityGraph>>) {
    let graph = built(graph);
    for node in graph.nodes() {
        assert!(
            node.neighbours
                .windows(2)
                .all(|pair| pair[0].distance_m <= pair[1].distance_m),
            "neighbours of {} are out of order",
            node.poi.id
        );
    }
}

#[then("the observatory has no neighbours")]
fn then_isolated(#[from(graph)] graph: &RefCell<Option<ProximityGraph>>) {
    let graph = built(graph);
    let neighbours = graph.neighbours("observatory").expect("observatory present");
    assert!(neighbours.is_empty());
}

#[scenario(path = "tests/features/proximity_graph.feature", index = 0)]
fn scenario_complete_campus(
    pois: RefCell<Vec<PointOfInterest>>,
    graph: RefCell<Option<ProximityGraph>>,
) {
    let _ = (pois, graph);
}

#[scenario(path = "tests/features/proximity_graph.feature", index = 1)]
fn scenario_isolated_observatory(
    pois: RefCell<Vec<PointOfInterest>>,
    graph: RefCell<Option<ProximityGraph>>,
) {
    let _ = (pois, graph);
}

#[scenario(path = "tests/features/proximity_graph.feature", index = 2)]
fn scenario_neighbour_cap(
    pois: RefCell<Vec<PointOfInterest>>,
    graph: RefCell<Option<ProximityGraph>>,
) {
    let _ = (pois, graph);
}
