//! Single-source shortest path search over a [`ProximityGraph`].
//!
//! Classic Dijkstra with a binary heap and lazy deletion. Among equal
//! tentative distances the node with the lowest identifier is settled first,
//! so results are deterministic regardless of input order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::SearchError;
use crate::graph::ProximityGraph;

/// Minimum-weight path between two graph nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphPath {
    /// Node identifiers from start to end, inclusive.
    pub nodes: Vec<String>,
    /// Sum of edge weights along the path in metres.
    pub distance_m: f64,
}

#[derive(Debug, Clone, Copy)]
struct QueueEntry<'a> {
    cost: f64,
    node: usize,
    id: &'a str,
}

impl PartialEq for QueueEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry<'_> {}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap: cheapest first, then lowest identifier.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.id.cmp(self.id))
    }
}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find the minimum total edge-weight path from `start` to `end`.
///
/// Returns `Ok(None)` when `end` is unreachable. A path from a node to itself
/// is a single node of zero length.
///
/// # Errors
///
/// Returns [`SearchError::UnknownNode`] when either identifier is not a node
/// of `graph`.
///
/// # Examples
/// ```
/// use campuswalk_core::{
///     GraphConfig, PointOfInterest, build_proximity_graph, lat_lng, shortest_path,
/// };
///
/// # fn main() -> Result<(), campuswalk_core::SearchError> {
/// let pois = vec![
///     PointOfInterest::unnamed("main-gate", lat_lng(-0.3603, 37.0093)),
///     PointOfInterest::unnamed("sports-complex", lat_lng(-0.3600, 37.0085)),
/// ];
/// let graph = build_proximity_graph(&pois, &GraphConfig::default());
/// let path = shortest_path(&graph, "main-gate", "sports-complex")?;
/// assert!(path.is_some());
/// # Ok(())
/// # }
/// ```
pub fn shortest_path(
    graph: &ProximityGraph,
    start: &str,
    end: &str,
) -> Result<Option<GraphPath>, SearchError> {
    let start_node = resolve(graph, start)?;
    let end_node = resolve(graph, end)?;

    let mut distances = vec![f64::INFINITY; graph.len()];
    let mut previous: Vec<Option<usize>> = vec![None; graph.len()];
    let mut settled = vec![false; graph.len()];
    let mut queue = BinaryHeap::new();

    distances[start_node] = 0.0;
    queue.push(QueueEntry {
        cost: 0.0,
        node: start_node,
        id: start,
    });

    while let Some(entry) = queue.pop() {
        if settled[entry.node] || entry.cost > distances[entry.node] {
            continue;
        }
        if entry.node == end_node {
            return Ok(Some(GraphPath {
                nodes: reconstruct_path(graph, &previous, start_node, end_node),
                distance_m: entry.cost,
            }));
        }
        settled[entry.node] = true;

        let Some(current) = graph.node_at(entry.node) else {
            continue;
        };
        for edge in &current.neighbours {
            let Some(neighbour) = graph.node_at(edge.target) else {
                continue;
            };
            if settled[edge.target] {
                continue;
            }
            let candidate = entry.cost + edge.distance_m;
            if candidate < distances[edge.target] {
                distances[edge.target] = candidate;
                previous[edge.target] = Some(entry.node);
                queue.push(QueueEntry {
                    cost: candidate,
                    node: edge.target,
                    id: &neighbour.poi.id,
                });
            }
        }
    }

    Ok(None)
}

fn resolve(graph: &ProximityGraph, id: &str) -> Result<usize, SearchError> {
    graph
        .index_of(id)
        .ok_or_else(|| SearchError::UnknownNode { id: id.to_owned() })
}

/// Follow predecessor links from `end` back to `start`.
///
/// The walk is bounded by the node count so a corrupt predecessor table can
/// never loop.
fn reconstruct_path(
    graph: &ProximityGraph,
    previous: &[Option<usize>],
    start: usize,
    end: usize,
) -> Vec<String> {
    let mut trail = vec![end];
    let mut current = end;
    while current != start && trail.len() <= graph.len() {
        match previous.get(current).copied().flatten() {
            Some(parent) => {
                trail.push(parent);
                current = parent;
            }
            None => break,
        }
    }
    trail
        .into_iter()
        .rev()
        .filter_map(|position| graph.node_at(position).map(|node| node.poi.id.clone()))
        .collect()
}
