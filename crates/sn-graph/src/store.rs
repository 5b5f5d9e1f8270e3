//! [`GraphAdapter`] backed by `petgraph`.
//!
//! # Data layout
//!
//! Topology lives in a `StableGraph` so that petgraph indices survive
//! removals.  Nodes carry their [`NodeId`]; edges carry an [`EdgeSlot`] with
//! the caller's [`EdgeId`], the endpoints as added, and the stored weight.
//! Two `FxHashMap`s translate caller ids into petgraph indices.
//!
//! The petgraph graph is always `Directed`.  An undirected store traverses
//! each edge in both orientations instead, which keeps one storage type for
//! both network kinds.

use petgraph::Direction::{Incoming, Outgoing};
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use rustc_hash::FxHashMap;

use sn_core::{EdgeId, NodeId};

use crate::{Adjacent, GraphAdapter, GraphError, GraphResult};

/// Per-edge payload stored in the petgraph graph.
#[derive(Copy, Clone, Debug)]
struct EdgeSlot {
    id:     EdgeId,
    from:   NodeId,
    to:     NodeId,
    weight: f64,
}

impl EdgeSlot {
    /// The endpoint opposite `here`.
    #[inline]
    fn far_end(&self, here: NodeId) -> NodeId {
        if self.from == here { self.to } else { self.from }
    }
}

/// Petgraph-backed topology store.
#[derive(Clone, Debug)]
pub struct PetgraphStore {
    graph:            StableDiGraph<NodeId, EdgeSlot>,
    node_index:       FxHashMap<NodeId, NodeIndex>,
    edge_index:       FxHashMap<EdgeId, EdgeIndex>,
    directed:         bool,
    allow_self_loops: bool,
}

impl PetgraphStore {
    /// Empty store.  Self-loops are accepted unless disabled with
    /// [`with_self_loops`](Self::with_self_loops).
    pub fn new(directed: bool) -> Self {
        Self {
            graph:            StableDiGraph::default(),
            node_index:       FxHashMap::default(),
            edge_index:       FxHashMap::default(),
            directed,
            allow_self_loops: true,
        }
    }

    pub fn with_self_loops(mut self, allow: bool) -> Self {
        self.allow_self_loops = allow;
        self
    }

    fn node_ix(&self, id: NodeId) -> GraphResult<NodeIndex> {
        self.node_index.get(&id).copied().ok_or(GraphError::UnknownNode(id))
    }

    fn slot(&self, id: EdgeId) -> GraphResult<&EdgeSlot> {
        self.edge_index
            .get(&id)
            .and_then(|&ix| self.graph.edge_weight(ix))
            .ok_or(GraphError::UnknownEdge(id))
    }

    /// Slots touching `ix`: outgoing first, then incoming ones that are not
    /// self-loops (those were already seen as outgoing).
    fn touching(&self, ix: NodeIndex) -> impl Iterator<Item = &EdgeSlot> + '_ {
        let outgoing = self.graph.edges_directed(ix, Outgoing).map(|e| e.weight());
        let incoming = self
            .graph
            .edges_directed(ix, Incoming)
            .map(|e| e.weight())
            .filter(|slot| slot.from != slot.to);
        outgoing.chain(incoming)
    }
}

impl Default for PetgraphStore {
    fn default() -> Self {
        Self::new(false)
    }
}

impl GraphAdapter for PetgraphStore {
    fn is_directed(&self) -> bool {
        self.directed
    }

    fn allows_self_loops(&self) -> bool {
        self.allow_self_loops
    }

    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn contains_node(&self, id: NodeId) -> bool {
        self.node_index.contains_key(&id)
    }

    fn contains_edge(&self, id: EdgeId) -> bool {
        self.edge_index.contains_key(&id)
    }

    fn add_node(&mut self, id: NodeId) -> GraphResult<()> {
        if self.node_index.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        let ix = self.graph.add_node(id);
        self.node_index.insert(id, ix);
        Ok(())
    }

    fn add_edge(&mut self, id: EdgeId, from: NodeId, to: NodeId, weight: f64) -> GraphResult<()> {
        if self.edge_index.contains_key(&id) {
            return Err(GraphError::DuplicateEdge(id));
        }
        let a = self.node_ix(from)?;
        let b = self.node_ix(to)?;
        if from == to && !self.allow_self_loops {
            return Err(GraphError::SelfLoop(from));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight { edge: id, weight });
        }

        let ix = self.graph.add_edge(a, b, EdgeSlot { id, from, to, weight });
        self.edge_index.insert(id, ix);
        Ok(())
    }

    fn remove_node(&mut self, id: NodeId) -> GraphResult<Vec<EdgeId>> {
        let ix = self.node_ix(id)?;

        let mut removed: Vec<EdgeId> = self.touching(ix).map(|slot| slot.id).collect();
        removed.sort_unstable();

        // StableGraph drops incident edges along with the node.
        self.graph.remove_node(ix);
        self.node_index.remove(&id);
        for edge in &removed {
            self.edge_index.remove(edge);
        }
        Ok(removed)
    }

    fn remove_edge(&mut self, id: EdgeId) -> GraphResult<()> {
        let ix = self.edge_index.remove(&id).ok_or(GraphError::UnknownEdge(id))?;
        self.graph.remove_edge(ix);
        Ok(())
    }

    fn endpoints(&self, id: EdgeId) -> GraphResult<(NodeId, NodeId)> {
        self.slot(id).map(|slot| (slot.from, slot.to))
    }

    fn weight(&self, id: EdgeId) -> GraphResult<f64> {
        self.slot(id).map(|slot| slot.weight)
    }

    fn incident_edges(&self, id: NodeId) -> GraphResult<Vec<EdgeId>> {
        let ix = self.node_ix(id)?;
        let mut edges: Vec<EdgeId> = self.touching(ix).map(|slot| slot.id).collect();
        edges.sort_unstable();
        Ok(edges)
    }

    fn out_edges(&self, id: NodeId) -> GraphResult<Vec<Adjacent>> {
        let ix = self.node_ix(id)?;
        let directed = self.directed;

        let mut out: Vec<Adjacent> = self
            .touching(ix)
            .filter(|slot| !directed || slot.from == id)
            .map(|slot| Adjacent { edge: slot.id, node: slot.far_end(id), weight: slot.weight })
            .collect();
        out.sort_unstable_by_key(|adj| adj.edge);
        Ok(out)
    }

    fn has_edge_between(&self, a: NodeId, b: NodeId) -> bool {
        let (Some(&ia), Some(&ib)) = (self.node_index.get(&a), self.node_index.get(&b)) else {
            return false;
        };
        self.graph.contains_edge(ia, ib) || (!self.directed && self.graph.contains_edge(ib, ia))
    }

    fn neighbors(&self, id: NodeId) -> GraphResult<impl Iterator<Item = NodeId> + Clone + '_> {
        let ix = self.node_ix(id)?;
        let directed = self.directed;
        let graph = &self.graph;

        let outgoing = graph.neighbors_directed(ix, Outgoing);
        let incoming = graph
            .neighbors_directed(ix, Incoming)
            .filter(move |&n| !directed && n != ix);
        Ok(outgoing.chain(incoming).map(move |n| graph[n]))
    }
}
