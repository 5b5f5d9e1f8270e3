//! The graph capability consumed by the network core.
//!
//! # Pluggability
//!
//! `sn-network` stores topology and weights only through [`GraphAdapter`].
//! The required methods are plain CRUD and adjacency; shortest paths come
//! for free as default methods running [`crate::dijkstra`] over that
//! adjacency, so every backend shares the same tie-breaking rules.
//!
//! # Thread safety
//!
//! Implementations must be `Send + Sync` so read-only queries can fan out
//! across Rayon workers.

use std::collections::BTreeMap;

use sn_core::{EdgeId, NodeId};

use crate::dijkstra::{self, Route};
use crate::GraphResult;

/// One traversable edge leaving a node, as seen from that node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Adjacent {
    pub edge:   EdgeId,
    /// The endpoint at the far side of `edge`.
    pub node:   NodeId,
    /// Stored weight of `edge`.
    pub weight: f64,
}

/// Topology store with weighted shortest paths.
pub trait GraphAdapter: Send + Sync {
    /// Fixed at construction.
    fn is_directed(&self) -> bool;

    /// Whether `add_edge(_, n, n, _)` can succeed.
    fn allows_self_loops(&self) -> bool;

    fn node_count(&self) -> usize;
    fn edge_count(&self) -> usize;
    fn contains_node(&self, id: NodeId) -> bool;
    fn contains_edge(&self, id: EdgeId) -> bool;

    /// Fails with `DuplicateNode` if `id` is already present.
    fn add_node(&mut self, id: NodeId) -> GraphResult<()>;

    /// Fails with `DuplicateEdge`, `UnknownNode` (either endpoint),
    /// `SelfLoop`, or `InvalidWeight` (negative or non-finite), leaving the
    /// graph unchanged.
    fn add_edge(&mut self, id: EdgeId, from: NodeId, to: NodeId, weight: f64) -> GraphResult<()>;

    /// Remove `id` and every edge touching it.  Returns the removed edges in
    /// ascending order.
    fn remove_node(&mut self, id: NodeId) -> GraphResult<Vec<EdgeId>>;

    fn remove_edge(&mut self, id: EdgeId) -> GraphResult<()>;

    /// `(from, to)` as the edge was added.
    fn endpoints(&self, id: EdgeId) -> GraphResult<(NodeId, NodeId)>;

    fn weight(&self, id: EdgeId) -> GraphResult<f64>;

    /// Every edge touching `id` regardless of direction, ascending.
    fn incident_edges(&self, id: NodeId) -> GraphResult<Vec<EdgeId>>;

    /// Edges traversable out of `id` (outgoing only when directed, both
    /// orientations otherwise), sorted by ascending `EdgeId`.
    fn out_edges(&self, id: NodeId) -> GraphResult<Vec<Adjacent>>;

    /// `true` if some edge can be traversed from `a` to `b`.
    fn has_edge_between(&self, a: NodeId, b: NodeId) -> bool;

    /// Nodes reachable over one edge from `id`.  Lazy, and restartable by
    /// cloning; a node joined by parallel edges appears once per edge.
    fn neighbors(&self, id: NodeId) -> GraphResult<impl Iterator<Item = NodeId> + Clone + '_>;

    // ── Provided: shortest paths ──────────────────────────────────────────

    /// Least-weight route over stored weights.  Fails with `NoPath` if `to`
    /// is unreachable from `from`.
    fn shortest_path(&self, from: NodeId, to: NodeId) -> GraphResult<Route> {
        dijkstra::shortest_path(self, from, to, &|_, stored| stored)
    }

    /// Least-cost route where each edge costs `cost(edge, stored_weight)`.
    /// A cost that is negative or non-finite fails with `InvalidWeight`.
    fn shortest_path_by(
        &self,
        from: NodeId,
        to:   NodeId,
        cost: &dyn Fn(EdgeId, f64) -> f64,
    ) -> GraphResult<Route> {
        dijkstra::shortest_path(self, from, to, cost)
    }

    /// Least cost from `from` to every reachable node (including `from`
    /// itself at `0.0`).
    fn distances_from(
        &self,
        from: NodeId,
        cost: &dyn Fn(EdgeId, f64) -> f64,
    ) -> GraphResult<BTreeMap<NodeId, f64>> {
        dijkstra::distances_from(self, from, cost)
    }
}
