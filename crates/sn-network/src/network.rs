//! The spatial network orchestrator.
//!
//! # Atomicity
//!
//! Every mutating method validates its inputs before touching state, and
//! hands the graph adapter its change last: either the whole operation
//! lands or the network is left exactly as it was.
//!
//! # Storage
//!
//! Topology and weights live in the graph adapter `S`; node and edge records
//! (coordinates, geometry, attributes) live here in `BTreeMap`s keyed by id,
//! so iteration and export run in ascending id order.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use sn_core::{Attributes, EdgeId, NetworkConfig, NodeId};
use sn_geometry::{Coord, GeoAdapter, GeometryAdapter, LineString};
use sn_graph::{GraphAdapter, PetgraphStore, Route};

use crate::distance::DistanceEngine;
use crate::error::EdgeEnd;
use crate::{EdgeOptions, NetworkError, NetworkResult, SpatialEdge, SpatialNode};

/// A graph whose nodes carry coordinates and whose edges carry geometry.
///
/// `S` stores topology, `G` builds and measures geometry.  The defaults
/// (`PetgraphStore`, `GeoAdapter`) are chosen from the [`NetworkConfig`] by
/// [`SpatialNetwork::new`]; use [`with_adapters`](Self::with_adapters) to
/// substitute either.
///
/// # Concurrency
///
/// Mutations take `&mut self` and queries `&self`; share a network across
/// threads behind a `RwLock` if it must change while being queried.
pub struct SpatialNetwork<S: GraphAdapter = PetgraphStore, G: GeometryAdapter = GeoAdapter> {
    config:    NetworkConfig,
    graph:     S,
    geometry:  G,
    nodes:     BTreeMap<NodeId, SpatialNode>,
    edges:     BTreeMap<EdgeId, SpatialEdge>,
    next_node: NodeId,
    next_edge: EdgeId,
}

impl SpatialNetwork {
    /// Empty network with the default adapters for `config`.
    pub fn new(config: NetworkConfig) -> NetworkResult<Self> {
        let graph = PetgraphStore::new(config.directed).with_self_loops(config.allow_self_loops);
        let geometry = GeoAdapter::new(config.metric);
        Self::with_adapters(config, graph, geometry)
    }
}

impl Default for SpatialNetwork {
    fn default() -> Self {
        let config = NetworkConfig::default();
        Self {
            graph:     PetgraphStore::new(config.directed),
            geometry:  GeoAdapter::new(config.metric),
            config,
            nodes:     BTreeMap::new(),
            edges:     BTreeMap::new(),
            next_node: NodeId(0),
            next_edge: EdgeId(0),
        }
    }
}

impl<S: GraphAdapter, G: GeometryAdapter> fmt::Debug for SpatialNetwork<S, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialNetwork")
            .field("config", &self.config)
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edges.len())
            .finish_non_exhaustive()
    }
}

impl<S: GraphAdapter, G: GeometryAdapter> SpatialNetwork<S, G> {
    /// Empty network over caller-supplied adapters.
    ///
    /// The graph adapter must be empty and agree with `config.directed`.
    pub fn with_adapters(config: NetworkConfig, graph: S, geometry: G) -> NetworkResult<Self> {
        config.validate()?;
        if graph.is_directed() != config.directed {
            return Err(sn_core::ConfigError::DirectednessMismatch {
                config:  config.directed,
                adapter: graph.is_directed(),
            }
            .into());
        }
        if graph.node_count() != 0 {
            return Err(sn_core::ConfigError::AdapterNotEmpty(graph.node_count()).into());
        }

        Ok(Self {
            config,
            graph,
            geometry,
            nodes:     BTreeMap::new(),
            edges:     BTreeMap::new(),
            next_node: NodeId(0),
            next_edge: EdgeId(0),
        })
    }

    // ── Dimensions & access ───────────────────────────────────────────────

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn is_directed(&self) -> bool {
        self.config.directed
    }

    pub fn graph(&self) -> &S {
        &self.graph
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> NetworkResult<&SpatialNode> {
        self.nodes.get(&id).ok_or(NetworkError::UnknownNode(id))
    }

    pub fn edge(&self, id: EdgeId) -> NetworkResult<&SpatialEdge> {
        self.edges.get(&id).ok_or(NetworkError::UnknownEdge(id))
    }

    /// Coordinate of `id`.
    pub fn coordinate(&self, id: NodeId) -> NetworkResult<Coord<f64>> {
        self.node(id).map(|n| n.coordinate)
    }

    /// All nodes, ascending id.
    pub fn nodes(&self) -> impl Iterator<Item = &SpatialNode> + '_ {
        self.nodes.values()
    }

    /// All edges, ascending id.
    pub fn edges(&self) -> impl Iterator<Item = &SpatialEdge> + '_ {
        self.edges.values()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Nodes one edge away from `id` (successors only when directed).
    pub fn neighbors(&self, id: NodeId) -> NetworkResult<impl Iterator<Item = NodeId> + Clone + '_> {
        Ok(self.graph.neighbors(id)?)
    }

    /// Every edge touching `id`, regardless of direction.
    pub fn incident_edges(&self, id: NodeId) -> NetworkResult<Vec<EdgeId>> {
        Ok(self.graph.incident_edges(id)?)
    }

    pub fn node_attributes_mut(&mut self, id: NodeId) -> NetworkResult<&mut Attributes> {
        self.nodes
            .get_mut(&id)
            .map(|n| &mut n.attributes)
            .ok_or(NetworkError::UnknownNode(id))
    }

    pub fn edge_attributes_mut(&mut self, id: EdgeId) -> NetworkResult<&mut Attributes> {
        self.edges
            .get_mut(&id)
            .map(|e| &mut e.attributes)
            .ok_or(NetworkError::UnknownEdge(id))
    }

    // ── Nodes ─────────────────────────────────────────────────────────────

    /// Add a node at `coordinate` and return its freshly allocated id.
    pub fn add_node(&mut self, coordinate: &[f64], attributes: Attributes) -> NetworkResult<NodeId> {
        let id = self.next_node;
        if id == NodeId::INVALID {
            return Err(NetworkError::IdsExhausted("node"));
        }
        self.add_node_with_id(id, coordinate, attributes)?;
        Ok(id)
    }

    /// Add a node under a caller-chosen id.  Fails with `DuplicateNode` if
    /// the id is taken and `ReservedNodeId` for [`NodeId::INVALID`].
    pub fn add_node_with_id(
        &mut self,
        id:         NodeId,
        coordinate: &[f64],
        attributes: Attributes,
    ) -> NetworkResult<()> {
        if id == NodeId::INVALID {
            return Err(NetworkError::ReservedNodeId(id));
        }
        if self.nodes.contains_key(&id) {
            return Err(NetworkError::DuplicateNode(id));
        }
        let point = self.geometry.make_point(coordinate)?;

        self.graph.add_node(id)?;
        self.nodes.insert(id, SpatialNode { id, coordinate: point.0, attributes });
        if id >= self.next_node {
            self.next_node = id.next();
        }

        debug!(%id, x = point.x(), y = point.y(), "node added");
        Ok(())
    }

    /// Move a node that has no edges yet.
    ///
    /// Edge geometry is never re-synchronised, so once any edge touches the
    /// node this fails with `CoordinateLocked`.
    pub fn set_coordinate(&mut self, id: NodeId, coordinate: &[f64]) -> NetworkResult<()> {
        if !self.nodes.contains_key(&id) {
            return Err(NetworkError::UnknownNode(id));
        }
        let incident = self.graph.incident_edges(id)?;
        if !incident.is_empty() {
            return Err(NetworkError::CoordinateLocked { node: id, edges: incident.len() });
        }
        let point = self.geometry.make_point(coordinate)?;

        if let Some(node) = self.nodes.get_mut(&id) {
            node.coordinate = point.0;
        }
        Ok(())
    }

    /// Remove a node and every edge touching it.  Returns the removed edges.
    pub fn remove_node(&mut self, id: NodeId) -> NetworkResult<Vec<EdgeId>> {
        if !self.nodes.contains_key(&id) {
            return Err(NetworkError::UnknownNode(id));
        }

        let removed = self.graph.remove_node(id)?;
        for edge in &removed {
            self.edges.remove(edge);
        }
        self.nodes.remove(&id);

        debug!(%id, cascaded = removed.len(), "node removed");
        Ok(removed)
    }

    // ── Edges ─────────────────────────────────────────────────────────────

    /// Connect two existing nodes and return the new edge's id.
    ///
    /// Without explicit geometry the edge is a straight line between the two
    /// coordinates.  Explicit geometry must start at `from` and end at `to`
    /// within the configured tolerance (either orientation is accepted in an
    /// undirected network; it is stored `from → to`).  Without an explicit
    /// weight the edge weighs its geometric length.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, options: EdgeOptions) -> NetworkResult<EdgeId> {
        let id = self.next_edge;
        if id == EdgeId::INVALID {
            return Err(NetworkError::IdsExhausted("edge"));
        }
        self.add_edge_with_id(id, from, to, options)?;
        Ok(id)
    }

    /// [`add_edge`](Self::add_edge) under a caller-chosen id.
    pub fn add_edge_with_id(
        &mut self,
        id:      EdgeId,
        from:    NodeId,
        to:      NodeId,
        options: EdgeOptions,
    ) -> NetworkResult<()> {
        if id == EdgeId::INVALID {
            return Err(NetworkError::ReservedEdgeId(id));
        }
        if self.edges.contains_key(&id) {
            return Err(NetworkError::DuplicateEdge(id));
        }
        let a = self.coordinate(from)?;
        let b = self.coordinate(to)?;
        if from == to && !(self.config.allow_self_loops && self.graph.allows_self_loops()) {
            return Err(NetworkError::SelfLoop(from));
        }

        let geometry = match options.geometry {
            None => self.geometry.make_line(a, b),
            Some(points) => {
                let line = self.geometry.make_path(&points)?;
                self.fit_geometry(from, to, a, b, line)?
            }
        };
        let length = self.geometry.length(&geometry);
        let weight = options.weight.unwrap_or(length);

        // Last fallible step: the adapter validates the weight.
        self.graph.add_edge(id, from, to, weight)?;
        self.edges.insert(id, SpatialEdge {
            id,
            from,
            to,
            geometry,
            length,
            weight,
            attributes: options.attributes,
        });
        if id >= self.next_edge {
            self.next_edge = id.next();
        }

        debug!(%id, %from, %to, length, weight, "edge added");
        Ok(())
    }

    /// Remove one edge and return it.
    pub fn remove_edge(&mut self, id: EdgeId) -> NetworkResult<SpatialEdge> {
        if !self.edges.contains_key(&id) {
            return Err(NetworkError::UnknownEdge(id));
        }
        self.graph.remove_edge(id)?;
        let edge = self.edges.remove(&id).ok_or(NetworkError::UnknownEdge(id))?;

        debug!(%id, "edge removed");
        Ok(edge)
    }

    /// Check that `line` joins `a` (at `from`) to `b` (at `to`), reversing it
    /// if it runs backwards in an undirected network.
    fn fit_geometry(
        &self,
        from: NodeId,
        to:   NodeId,
        a:    Coord<f64>,
        b:    Coord<f64>,
        mut line: LineString<f64>,
    ) -> NetworkResult<LineString<f64>> {
        let tolerance = self.config.tolerance;
        let (first, last) = match (line.0.first(), line.0.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Err(sn_geometry::GeometryError::TooFewPoints(line.0.len()).into()),
        };

        let gap_start = self.geometry.endpoint_gap(first, a);
        let gap_end = self.geometry.endpoint_gap(last, b);
        if gap_start <= tolerance && gap_end <= tolerance {
            return Ok(line);
        }

        if !self.config.directed
            && self.geometry.endpoint_gap(first, b) <= tolerance
            && self.geometry.endpoint_gap(last, a) <= tolerance
        {
            line.0.reverse();
            return Ok(line);
        }

        let (end, gap) = if gap_start > tolerance {
            (EdgeEnd::Start, gap_start)
        } else {
            (EdgeEnd::End, gap_end)
        };
        Err(NetworkError::GeometryMismatch { from, to, end, gap, tolerance })
    }

    // ── Distance queries ──────────────────────────────────────────────────

    /// Read-only distance engine over this network.
    pub fn distances(&self) -> DistanceEngine<'_, S, G> {
        DistanceEngine::new(self)
    }

    /// Straight-line distance between two nodes; defined with or without a
    /// path between them.
    pub fn flying_distance(&self, from: NodeId, to: NodeId) -> NetworkResult<f64> {
        self.distances().flying_distance(from, to)
    }

    /// Least total edge weight from `from` to `to`.
    pub fn routing_distance(&self, from: NodeId, to: NodeId) -> NetworkResult<f64> {
        self.distances().routing_distance(from, to)
    }

    /// `routing_distance / flying_distance`.
    pub fn detour_ratio(&self, from: NodeId, to: NodeId) -> NetworkResult<f64> {
        self.distances().detour_ratio(from, to)
    }

    /// The least-weight route itself.
    pub fn route(&self, from: NodeId, to: NodeId) -> NetworkResult<Route> {
        self.distances().route(from, to)
    }
}
