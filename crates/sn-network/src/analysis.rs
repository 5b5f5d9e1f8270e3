//! Network-wide measures built on the distance queries.
//!
//! | Method                 | Result                                                  |
//! |------------------------|---------------------------------------------------------|
//! | `distance_strength`    | sum of flying distances to distinct neighbours          |
//! | `node_accessibility`   | mean detour ratio from one node to all it can reach     |
//! | `graph_accessibility`  | mean of the defined node accessibilities                |
//! | `closed_triangles`     | neighbour pairs that are themselves joined              |
//! | `open_triangles`       | neighbour pairs that are not                            |
//! | `crossing_edges`       | edge pairs whose geometries cross                       |
//! | `is_planar`            | no two edge geometries cross                            |
//!
//! Accessibility runs one single-source Dijkstra per node instead of one
//! query per node pair.  With the `parallel` feature `graph_accessibility`
//! spreads those searches over Rayon workers.
//!
//! Crossing detection bulk-loads edge bounding boxes into an R-tree (via
//! `rstar`) and runs the exact segment test only on pairs whose boxes meet.

use std::collections::BTreeSet;

use rstar::{AABB, RTree, RTreeObject};
use tracing::debug;

use sn_core::{EdgeId, NodeId};
use sn_geometry::GeometryAdapter;
use sn_graph::GraphAdapter;

use crate::{NetworkResult, SpatialEdge, SpatialNetwork, StoredWeight};

impl<S: GraphAdapter, G: GeometryAdapter> SpatialNetwork<S, G> {
    /// Sum of flying distances from `node` to each distinct neighbour.
    ///
    /// A neighbour joined by several parallel edges counts once; a self-loop
    /// contributes nothing.
    pub fn distance_strength(&self, node: NodeId) -> NetworkResult<f64> {
        let neighbours: BTreeSet<NodeId> = self.neighbors(node)?.filter(|&n| n != node).collect();
        let engine = self.distances();

        let mut total = 0.0;
        for n in neighbours {
            total += engine.flying_distance(node, n)?;
        }
        Ok(total)
    }

    /// Mean detour ratio from `node` to every other node it can reach.
    ///
    /// Nodes sharing `node`'s coordinate have no defined ratio and are
    /// skipped.  `None` when nothing remains.
    pub fn node_accessibility(&self, node: NodeId) -> NetworkResult<Option<f64>> {
        let engine = self.distances();
        let reached = engine.routing_distances_from(node, &StoredWeight)?;

        let mut sum = 0.0;
        let mut count = 0usize;
        for (&target, &routing) in &reached {
            if target == node {
                continue;
            }
            let flying = engine.flying_distance(node, target)?;
            if flying == 0.0 {
                continue;
            }
            sum += routing / flying;
            count += 1;
        }
        Ok(mean(sum, count))
    }

    /// Mean of [`node_accessibility`](Self::node_accessibility) over every
    /// node where it is defined.
    pub fn graph_accessibility(&self) -> NetworkResult<Option<f64>> {
        let ids: Vec<NodeId> = self.node_ids().collect();

        #[cfg(not(feature = "parallel"))]
        let per_node: Vec<Option<f64>> = ids
            .iter()
            .map(|&id| self.node_accessibility(id))
            .collect::<NetworkResult<_>>()?;

        #[cfg(feature = "parallel")]
        let per_node: Vec<Option<f64>> = {
            use rayon::prelude::*;

            ids.par_iter()
                .map(|&id| self.node_accessibility(id))
                .collect::<NetworkResult<_>>()?
        };

        let defined: Vec<f64> = per_node.into_iter().flatten().collect();
        debug!(nodes = ids.len(), defined = defined.len(), "graph accessibility");
        Ok(mean(defined.iter().sum(), defined.len()))
    }

    // ── Triangles ─────────────────────────────────────────────────────────

    /// Pairs of distinct neighbours of `node` that are joined by an edge.
    ///
    /// Adjacency is taken in either direction, so in a directed network a
    /// one-way edge still closes a triangle.  Each triple is reported once
    /// as `[node, n1, n2]` with `n1 < n2`.
    pub fn closed_triangles(&self, node: NodeId) -> NetworkResult<Vec<[NodeId; 3]>> {
        self.triangles(node, true)
    }

    /// Pairs of distinct neighbours of `node` with no edge between them.
    pub fn open_triangles(&self, node: NodeId) -> NetworkResult<Vec<[NodeId; 3]>> {
        self.triangles(node, false)
    }

    fn triangles(&self, node: NodeId, closed: bool) -> NetworkResult<Vec<[NodeId; 3]>> {
        let adjacent = self.adjacent_set(node)?;
        let adjacent: Vec<NodeId> = adjacent.into_iter().collect();
        let graph = self.graph();

        let mut out = Vec::new();
        for (i, &n1) in adjacent.iter().enumerate() {
            for &n2 in &adjacent[i + 1..] {
                let joined = graph.has_edge_between(n1, n2) || graph.has_edge_between(n2, n1);
                if joined == closed {
                    out.push([node, n1, n2]);
                }
            }
        }
        Ok(out)
    }

    /// Distinct nodes sharing an edge with `node` in either direction.
    fn adjacent_set(&self, node: NodeId) -> NetworkResult<BTreeSet<NodeId>> {
        let mut set = BTreeSet::new();
        for id in self.incident_edges(node)? {
            if let Some(other) = self.edge(id)?.other_end(node) {
                if other != node {
                    set.insert(other);
                }
            }
        }
        Ok(set)
    }

    // ── Crossings ─────────────────────────────────────────────────────────

    /// Every pair of edges whose geometries cross, ascending by id.
    ///
    /// Edges that merely meet at a shared end node do not cross; parallel
    /// edges overlapping along their length do.
    pub fn crossing_edges(&self) -> Vec<(EdgeId, EdgeId)> {
        let entries: Vec<EdgeBox> = self.edges().map(EdgeBox::of).collect();
        let tree = RTree::bulk_load(entries);
        let geometry = self.geometry();

        let mut out: Vec<(EdgeId, EdgeId)> = tree
            .intersection_candidates_with_other_tree(&tree)
            .filter(|(a, b)| a.id < b.id)
            .filter_map(|(a, b)| {
                let (ea, eb) = (self.edge(a.id).ok()?, self.edge(b.id).ok()?);
                geometry.crosses(&ea.geometry, &eb.geometry).then_some((a.id, b.id))
            })
            .collect();
        out.sort_unstable();
        out
    }

    /// `true` if no two edge geometries cross, i.e. the network as drawn is
    /// a plane embedding.
    pub fn is_planar(&self) -> bool {
        self.crossing_edges().is_empty()
    }
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Bounding box of one edge geometry, in raw coordinate units.
struct EdgeBox {
    id:       EdgeId,
    envelope: AABB<[f64; 2]>,
}

impl EdgeBox {
    fn of(edge: &SpatialEdge) -> Self {
        let (mut lo, mut hi) = ([f64::INFINITY; 2], [f64::NEG_INFINITY; 2]);
        for c in edge.geometry.coords() {
            lo = [lo[0].min(c.x), lo[1].min(c.y)];
            hi = [hi[0].max(c.x), hi[1].max(c.y)];
        }
        Self { id: edge.id, envelope: AABB::from_corners(lo, hi) }
    }
}

impl RTreeObject for EdgeBox {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

fn mean(sum: f64, count: usize) -> Option<f64> {
    (count > 0).then(|| sum / count as f64)
}
