//! Proximity graph over campus points of interest.
//!
//! Each POI becomes a node linked to its nearest neighbours within a cutoff
//! radius. The graph stands in for the real pedestrian network: it is cheap to
//! build for tens to hundreds of POIs and is never mutated after
//! construction.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use geo::Coord;
use log::{debug, warn};

use crate::config::{Adjacency, GraphConfig, NeighbourSearch};
use crate::geodesic::haversine_distance;
use crate::PointOfInterest;

mod index;

use index::CandidateIndex;

/// A weighted link to a neighbouring node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Position of the neighbouring node in [`ProximityGraph::nodes`].
    pub target: usize,
    /// Great-circle distance to the neighbour in metres.
    pub distance_m: f64,
}

/// A POI together with its outgoing edges, nearest first.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    /// The point of interest represented by this node.
    pub poi: PointOfInterest,
    /// Outgoing edges sorted by ascending distance.
    pub neighbours: Vec<Edge>,
}

/// Immutable adjacency list keyed by POI identifier.
///
/// Nodes keep the order of the input collection, which is also the scan order
/// used when snapping coordinates to their nearest node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProximityGraph {
    nodes: Vec<GraphNode>,
    index: HashMap<String, usize>,
}

impl ProximityGraph {
    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.neighbours.len()).sum()
    }

    /// All nodes in input order.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Look up a node by POI identifier.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.index_of(id).and_then(|position| self.nodes.get(position))
    }

    /// Look up a node by position.
    pub fn node_at(&self, position: usize) -> Option<&GraphNode> {
        self.nodes.get(position)
    }

    /// Position of the node with identifier `id`.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Neighbour identifiers and edge lengths for `id`, nearest first.
    ///
    /// # Examples
    /// ```
    /// use campuswalk_core::{GraphConfig, PointOfInterest, build_proximity_graph, lat_lng};
    ///
    /// let pois = vec![
    ///     PointOfInterest::unnamed("gate", lat_lng(-0.3603, 37.0093)),
    ///     PointOfInterest::unnamed("library", lat_lng(-0.3605, 37.0095)),
    /// ];
    /// let graph = build_proximity_graph(&pois, &GraphConfig::default());
    /// let neighbours = graph.neighbours("gate").unwrap_or_default();
    /// assert_eq!(neighbours.len(), 1);
    /// assert_eq!(neighbours[0].0, "library");
    /// ```
    pub fn neighbours(&self, id: &str) -> Option<Vec<(&str, f64)>> {
        let node = self.node(id)?;
        Some(
            node.neighbours
                .iter()
                .filter_map(|edge| {
                    self.nodes
                        .get(edge.target)
                        .map(|target| (target.poi.id.as_str(), edge.distance_m))
                })
                .collect(),
        )
    }

    /// The node closest to `coord`, first in input order on ties.
    pub fn nearest_node(&self, coord: Coord<f64>) -> Option<&GraphNode> {
        let mut nearest: Option<(&GraphNode, f64)> = None;
        for node in &self.nodes {
            let distance = haversine_distance(coord, node.poi.location);
            match nearest {
                Some((_, best)) if distance >= best => {}
                _ => nearest = Some((node, distance)),
            }
        }
        nearest.map(|(node, _)| node)
    }
}

/// Build a proximity graph connecting each POI to its nearest neighbours.
///
/// Every POI becomes a node, even when no other POI lies within
/// `config.max_radius_m`. Neighbour lists keep at most
/// `config.max_neighbours` entries sorted by distance, ties in input order.
/// Later POIs reusing an identifier are skipped.
///
/// # Examples
/// ```
/// use campuswalk_core::{GraphConfig, PointOfInterest, build_proximity_graph, lat_lng};
///
/// let pois = vec![
///     PointOfInterest::new("gate", "Main Gate", lat_lng(-0.3603, 37.0093)),
///     PointOfInterest::new("library", "Main Library", lat_lng(-0.3605, 37.0095)),
///     PointOfInterest::new("hall", "Student Centre", lat_lng(-0.3610, 37.0090)),
/// ];
/// let graph = build_proximity_graph(&pois, &GraphConfig::default());
/// assert_eq!(graph.len(), 3);
/// assert!(graph.nodes().iter().all(|node| node.neighbours.len() == 2));
/// ```
pub fn build_proximity_graph(pois: &[PointOfInterest], config: &GraphConfig) -> ProximityGraph {
    let mut graph = insert_nodes(pois);
    let lists = match config.neighbour_search {
        NeighbourSearch::Exhaustive => exhaustive_neighbours(&graph.nodes, config),
        NeighbourSearch::Indexed => indexed_neighbours(&graph.nodes, config),
    };
    for (node, neighbours) in graph.nodes.iter_mut().zip(lists) {
        node.neighbours = neighbours;
    }
    if config.adjacency == Adjacency::Symmetric {
        symmetrise(&mut graph.nodes);
    }
    debug!(
        "built proximity graph with {} nodes and {} edges",
        graph.len(),
        graph.edge_count()
    );
    graph
}

fn insert_nodes(pois: &[PointOfInterest]) -> ProximityGraph {
    let mut graph = ProximityGraph {
        nodes: Vec::with_capacity(pois.len()),
        index: HashMap::with_capacity(pois.len()),
    };
    for poi in pois {
        match graph.index.entry(poi.id.clone()) {
            Entry::Occupied(_) => {
                warn!("skipping duplicate point of interest id {:?}", poi.id);
            }
            Entry::Vacant(slot) => {
                slot.insert(graph.nodes.len());
                graph.nodes.push(GraphNode {
                    poi: poi.clone(),
                    neighbours: Vec::new(),
                });
            }
        }
    }
    graph
}

fn exhaustive_neighbours(nodes: &[GraphNode], config: &GraphConfig) -> Vec<Vec<Edge>> {
    nodes
        .iter()
        .enumerate()
        .map(|(origin, node)| nearest_within(node, origin, nodes, 0..nodes.len(), config))
        .collect()
}

fn indexed_neighbours(nodes: &[GraphNode], config: &GraphConfig) -> Vec<Vec<Edge>> {
    let index = CandidateIndex::new(nodes);
    nodes
        .iter()
        .enumerate()
        .map(|(origin, node)| {
            let mut candidates = index.candidates_within(node.poi.location, config.max_radius_m);
            // Input order keeps tie-breaking identical to the exhaustive scan.
            candidates.sort_unstable();
            nearest_within(node, origin, nodes, candidates, config)
        })
        .collect()
}

fn nearest_within(
    node: &GraphNode,
    origin: usize,
    nodes: &[GraphNode],
    candidates: impl IntoIterator<Item = usize>,
    config: &GraphConfig,
) -> Vec<Edge> {
    let mut edges: Vec<Edge> = candidates
        .into_iter()
        .filter(|&target| target != origin)
        .filter_map(|target| {
            let other = nodes.get(target)?;
            let distance_m = haversine_distance(node.poi.location, other.poi.location);
            (distance_m <= config.max_radius_m).then_some(Edge { target, distance_m })
        })
        .collect();
    // Stable: equal distances stay in input order.
    edges.sort_by(|lhs, rhs| lhs.distance_m.total_cmp(&rhs.distance_m));
    edges.truncate(config.max_neighbours);
    edges
}

fn symmetrise(nodes: &mut [GraphNode]) {
    let mirrored: Vec<(usize, Edge)> = nodes
        .iter()
        .enumerate()
        .flat_map(|(origin, node)| {
            node.neighbours.iter().map(move |edge| {
                (
                    edge.target,
                    Edge {
                        target: origin,
                        distance_m: edge.distance_m,
                    },
                )
            })
        })
        .collect();

    for (owner, edge) in mirrored {
        let Some(node) = nodes.get_mut(owner) else {
            continue;
        };
        if node.neighbours.iter().all(|existing| existing.target != edge.target) {
            node.neighbours.push(edge);
        }
    }

    for node in nodes.iter_mut() {
        node.neighbours.sort_by(|lhs, rhs| {
            lhs.distance_m
                .total_cmp(&rhs.distance_m)
                .then_with(|| lhs.target.cmp(&rhs.target))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesic::lat_lng;
    use crate::test_support::{campus_pois, poi, two_clusters};
    use rstest::rstest;

    fn neighbour_ids<'a>(graph: &'a ProximityGraph, id: &str) -> Vec<&'a str> {
        graph
            .neighbours(id)
            .expect("node exists")
            .into_iter()
            .map(|(neighbour, _)| neighbour)
            .collect()
    }

    #[rstest]
    fn empty_input_yields_empty_graph() {
        let graph = build_proximity_graph(&[], &GraphConfig::default());
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[rstest]
    #[case(2, 1)]
    #[case(5, 4)]
    #[case(6, 5)]
    #[case(8, 5)]
    fn nearby_pois_keep_min_k_neighbours(#[case] count: usize, #[case] expected: usize) {
        let pois: Vec<_> = (0..count)
            .map(|i| poi(&format!("p{i}"), 0.0001 * i as f64, 0.0))
            .collect();
        let graph = build_proximity_graph(&pois, &GraphConfig::default());
        assert!(graph.nodes().iter().all(|node| node.neighbours.len() == expected));
    }

    #[rstest]
    fn distant_poi_is_isolated() {
        let mut pois = campus_pois();
        pois.push(poi("observatory", 0.5, 37.5));
        let graph = build_proximity_graph(&pois, &GraphConfig::default());
        let node = graph.node("observatory").expect("isolated node present");
        assert!(node.neighbours.is_empty());
    }

    #[rstest]
    fn neighbours_are_sorted_by_distance() {
        let graph = build_proximity_graph(&campus_pois(), &GraphConfig::default());
        for node in graph.nodes() {
            let distances: Vec<f64> = node.neighbours.iter().map(|e| e.distance_m).collect();
            assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
        }
    }

    #[rstest]
    fn equal_distances_keep_input_order() {
        let pois = vec![
            poi("centre", 0.0, 0.0),
            poi("north", 0.001, 0.0),
            poi("south", -0.001, 0.0),
        ];
        let graph = build_proximity_graph(&pois, &GraphConfig::default());
        assert_eq!(neighbour_ids(&graph, "centre"), vec!["north", "south"]);
    }

    #[rstest]
    fn duplicate_identifiers_keep_first_occurrence() {
        let pois = vec![
            poi("hall", 0.0, 0.0),
            poi("hall", 0.002, 0.0),
            poi("annex", 0.001, 0.0),
        ];
        let graph = build_proximity_graph(&pois, &GraphConfig::default());
        assert_eq!(graph.len(), 2);
        let hall = graph.node("hall").expect("hall present");
        assert_eq!(hall.poi.location, lat_lng(0.0, 0.0));
    }

    fn lopsided_pois() -> Vec<PointOfInterest> {
        // "hub" has six close neighbours; "edge" only reaches the hub and is
        // not among the hub's five nearest.
        let mut pois: Vec<_> = (1..=6)
            .map(|i| poi(&format!("ring{i}"), 0.0001 * i as f64, 0.0))
            .collect();
        pois.insert(0, poi("hub", 0.0, 0.0));
        pois.push(poi("edge", 0.0, -0.003));
        pois
    }

    #[rstest]
    fn directed_adjacency_can_be_asymmetric() {
        let graph = build_proximity_graph(&lopsided_pois(), &GraphConfig::default());
        assert!(neighbour_ids(&graph, "edge").contains(&"hub"));
        assert!(!neighbour_ids(&graph, "hub").contains(&"edge"));
    }

    #[rstest]
    fn symmetric_adjacency_mirrors_every_edge() {
        let config = GraphConfig {
            adjacency: Adjacency::Symmetric,
            ..GraphConfig::default()
        };
        let graph = build_proximity_graph(&lopsided_pois(), &config);
        for node in graph.nodes() {
            for edge in &node.neighbours {
                let back = graph.node_at(edge.target).expect("target exists");
                assert!(
                    back.neighbours
                        .iter()
                        .any(|reverse| graph.node_at(reverse.target) == Some(node)),
                    "{} -> {} has no reverse edge",
                    node.poi.id,
                    back.poi.id
                );
            }
        }
        assert!(neighbour_ids(&graph, "hub").contains(&"edge"));
    }

    #[rstest]
    #[case(campus_pois())]
    #[case(two_clusters())]
    #[case(lopsided_pois())]
    fn indexed_search_matches_exhaustive(#[case] pois: Vec<PointOfInterest>) {
        let exhaustive = build_proximity_graph(&pois, &GraphConfig::default());
        let indexed = build_proximity_graph(
            &pois,
            &GraphConfig {
                neighbour_search: NeighbourSearch::Indexed,
                ..GraphConfig::default()
            },
        );
        assert_eq!(exhaustive, indexed);
    }

    #[rstest]
    fn nearest_node_prefers_first_on_ties() {
        let pois = vec![poi("north", 0.001, 0.0), poi("south", -0.001, 0.0)];
        let graph = build_proximity_graph(&pois, &GraphConfig::default());
        let nearest = graph.nearest_node(lat_lng(0.0, 0.0)).expect("non-empty graph");
        assert_eq!(nearest.poi.id, "north");
    }
}
