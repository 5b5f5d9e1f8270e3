//! Dijkstra's algorithm over any [`GraphAdapter`].
//!
//! # Tie-breaking
//!
//! Results are deterministic and independent of the storage backend:
//!
//! 1. Nodes are settled in ascending `(cost, NodeId)` order.
//! 2. A settled node's edges are relaxed in ascending `EdgeId` order
//!    ([`GraphAdapter::out_edges`] guarantees the order).
//! 3. A tentative distance is replaced only by a strictly smaller one.
//!
//! Among several routes of equal total cost, the one reaching each node
//! first under this order is kept.

use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, BinaryHeap};

use rustc_hash::FxHashMap;
use tracing::trace;

use sn_core::{EdgeId, NodeId};

use crate::{GraphAdapter, GraphError, GraphResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a shortest-path query.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Edges to traverse in order, from source to destination.
    pub edges: Vec<EdgeId>,
    /// Nodes visited in order, source and destination included.
    pub nodes: Vec<NodeId>,
    /// Sum of the effective edge costs along `edges`.
    pub total_weight: f64,
}

impl Route {
    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }

    fn trivial(node: NodeId) -> Self {
        Route { edges: vec![], nodes: vec![node], total_weight: 0.0 }
    }
}

// ── Heap key ──────────────────────────────────────────────────────────────────

/// Non-negative finite cost with a total order, so it can sit in a heap key.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

// ── Search ────────────────────────────────────────────────────────────────────

struct Search {
    /// dist[v] = best known cost to reach v.
    dist: FxHashMap<NodeId, f64>,
    /// prev[v] = (edge that reached v, node it came from).
    prev: FxHashMap<NodeId, (EdgeId, NodeId)>,
}

/// Run Dijkstra from `from`, stopping early once `target` is settled.
fn search<G: GraphAdapter + ?Sized>(
    graph:  &G,
    from:   NodeId,
    target: Option<NodeId>,
    cost:   &dyn Fn(EdgeId, f64) -> f64,
) -> GraphResult<Search> {
    if !graph.contains_node(from) {
        return Err(GraphError::UnknownNode(from));
    }

    let mut dist: FxHashMap<NodeId, f64> = FxHashMap::default();
    let mut prev: FxHashMap<NodeId, (EdgeId, NodeId)> = FxHashMap::default();
    dist.insert(from, 0.0);

    // Min-heap: Reverse makes BinaryHeap (max) behave as min-heap.
    // Secondary key NodeId ensures deterministic tie-breaking.
    let mut heap: BinaryHeap<Reverse<(Cost, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((Cost(0.0), from)));

    let mut settled = 0usize;
    while let Some(Reverse((Cost(d), node))) = heap.pop() {
        // Skip stale heap entries.
        if d > dist[&node] {
            continue;
        }
        settled += 1;

        if target == Some(node) {
            break;
        }

        for adj in graph.out_edges(node)? {
            let w = cost(adj.edge, adj.weight);
            if !w.is_finite() || w < 0.0 {
                return Err(GraphError::InvalidWeight { edge: adj.edge, weight: w });
            }

            let candidate = d + w;
            let improves = dist.get(&adj.node).is_none_or(|&best| candidate < best);
            if improves {
                dist.insert(adj.node, candidate);
                prev.insert(adj.node, (adj.edge, node));
                heap.push(Reverse((Cost(candidate), adj.node)));
            }
        }
    }

    trace!(%from, ?target, settled, reached = dist.len(), "dijkstra finished");
    Ok(Search { dist, prev })
}

/// Least-cost route from `from` to `to`.
pub fn shortest_path<G: GraphAdapter + ?Sized>(
    graph: &G,
    from:  NodeId,
    to:    NodeId,
    cost:  &dyn Fn(EdgeId, f64) -> f64,
) -> GraphResult<Route> {
    if !graph.contains_node(from) {
        return Err(GraphError::UnknownNode(from));
    }
    if !graph.contains_node(to) {
        return Err(GraphError::UnknownNode(to));
    }
    if from == to {
        return Ok(Route::trivial(from));
    }

    let Search { dist, prev } = search(graph, from, Some(to), cost)?;
    match dist.get(&to) {
        Some(&total) => Ok(reconstruct(&prev, from, to, total)),
        None => Err(GraphError::NoPath { from, to }),
    }
}

/// Least cost from `from` to every node it can reach.
pub fn distances_from<G: GraphAdapter + ?Sized>(
    graph: &G,
    from:  NodeId,
    cost:  &dyn Fn(EdgeId, f64) -> f64,
) -> GraphResult<BTreeMap<NodeId, f64>> {
    let Search { dist, .. } = search(graph, from, None, cost)?;
    Ok(dist.into_iter().collect())
}

fn reconstruct(
    prev:  &FxHashMap<NodeId, (EdgeId, NodeId)>,
    from:  NodeId,
    to:    NodeId,
    total: f64,
) -> Route {
    let mut edges = Vec::new();
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        let Some(&(edge, before)) = prev.get(&cur) else {
            break;
        };
        edges.push(edge);
        nodes.push(before);
        cur = before;
    }
    edges.reverse();
    nodes.reverse();
    Route { edges, nodes, total_weight: total }
}
