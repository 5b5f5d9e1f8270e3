//! Plain-data node and edge records, and construction from them.
//!
//! Records are what leaves and enters a network: exporters walk
//! [`SpatialNetwork::node_records`] / [`SpatialNetwork::edge_records`], and
//! importers feed a [`NetworkBuilder`].  Coordinates are bare `Vec<f64>` so
//! a record deserialises from any format without knowing about `geo`.

use tracing::info;

use sn_core::{Attributes, EdgeId, NetworkConfig, NodeId};
use sn_geometry::{Coord, GeometryAdapter};
use sn_graph::GraphAdapter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{EdgeOptions, NetworkResult, SpatialNetwork};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeRecord {
    pub id:         NodeId,
    pub coordinate: Vec<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: Attributes,
}

impl NodeRecord {
    pub fn new(id: NodeId, coordinate: impl Into<Vec<f64>>) -> Self {
        Self { id, coordinate: coordinate.into(), attributes: Attributes::new() }
    }
}

/// An edge as data.  `geometry: None` means a straight line between the
/// endpoint nodes; `weight: None` means the geometric length.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeRecord {
    pub id:         EdgeId,
    pub from:       NodeId,
    pub to:         NodeId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub geometry:   Option<Vec<Vec<f64>>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weight:     Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: Attributes,
}

impl EdgeRecord {
    pub fn new(id: EdgeId, from: NodeId, to: NodeId) -> Self {
        Self { id, from, to, geometry: None, weight: None, attributes: Attributes::new() }
    }
}

// ── Export ────────────────────────────────────────────────────────────────────

impl<S: GraphAdapter, G: GeometryAdapter> SpatialNetwork<S, G> {
    /// One record per node, ascending id.
    pub fn node_records(&self) -> impl Iterator<Item = NodeRecord> + '_ {
        self.nodes().map(|n| NodeRecord {
            id:         n.id,
            coordinate: vec![n.coordinate.x, n.coordinate.y],
            attributes: n.attributes.clone(),
        })
    }

    /// One record per edge, ascending id, with explicit geometry and weight.
    pub fn edge_records(&self) -> impl Iterator<Item = EdgeRecord> + '_ {
        self.edges().map(|e| EdgeRecord {
            id:         e.id,
            from:       e.from,
            to:         e.to,
            geometry:   Some(e.geometry.coords().map(|c| vec![c.x, c.y]).collect()),
            weight:     Some(e.weight),
            attributes: e.attributes.clone(),
        })
    }
}

// ── NetworkBuilder ────────────────────────────────────────────────────────────

/// Builds a [`SpatialNetwork`] from node and edge records in one step.
///
/// Nodes are added before edges, each in the order given.  The first record
/// that violates a network invariant aborts the build and its error is
/// returned; no partially built network escapes.
///
/// ```
/// use sn_network::{EdgeId, EdgeRecord, NetworkBuilder, NetworkConfig, NodeId, NodeRecord};
///
/// let net = NetworkBuilder::new(NetworkConfig::undirected())
///     .node(NodeRecord::new(NodeId(0), [0.0, 0.0]))
///     .node(NodeRecord::new(NodeId(1), [3.0, 4.0]))
///     .edge(EdgeRecord::new(EdgeId(0), NodeId(0), NodeId(1)))
///     .build()
///     .unwrap();
///
/// assert_eq!(net.routing_distance(NodeId(0), NodeId(1)).unwrap(), 5.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct NetworkBuilder {
    config: NetworkConfig,
    nodes:  Vec<NodeRecord>,
    edges:  Vec<EdgeRecord>,
}

impl NetworkBuilder {
    pub fn new(config: NetworkConfig) -> Self {
        Self { config, nodes: Vec::new(), edges: Vec::new() }
    }

    pub fn node(mut self, record: NodeRecord) -> Self {
        self.nodes.push(record);
        self
    }

    pub fn nodes(mut self, records: impl IntoIterator<Item = NodeRecord>) -> Self {
        self.nodes.extend(records);
        self
    }

    pub fn edge(mut self, record: EdgeRecord) -> Self {
        self.edges.push(record);
        self
    }

    pub fn edges(mut self, records: impl IntoIterator<Item = EdgeRecord>) -> Self {
        self.edges.extend(records);
        self
    }

    /// Build over the default adapters for the config.
    pub fn build(self) -> NetworkResult<SpatialNetwork> {
        let network = SpatialNetwork::new(self.config.clone())?;
        self.populate(network)
    }

    /// Build over caller-supplied (empty) adapters.
    pub fn build_with<S: GraphAdapter, G: GeometryAdapter>(
        self,
        graph:    S,
        geometry: G,
    ) -> NetworkResult<SpatialNetwork<S, G>> {
        let network = SpatialNetwork::with_adapters(self.config.clone(), graph, geometry)?;
        self.populate(network)
    }

    fn populate<S: GraphAdapter, G: GeometryAdapter>(
        self,
        mut network: SpatialNetwork<S, G>,
    ) -> NetworkResult<SpatialNetwork<S, G>> {
        for node in self.nodes {
            network.add_node_with_id(node.id, &node.coordinate, node.attributes)?;
        }

        for edge in self.edges {
            let mut options = EdgeOptions::new().attributes(edge.attributes);
            if let Some(points) = edge.geometry {
                let coords = points
                    .iter()
                    .map(|p| network.geometry().make_point(p).map(|pt| pt.0))
                    .collect::<Result<Vec<Coord<f64>>, _>>()?;
                options = options.geometry(coords);
            }
            if let Some(weight) = edge.weight {
                options = options.weight(weight);
            }
            network.add_edge_with_id(edge.id, edge.from, edge.to, options)?;
        }

        info!(
            nodes    = network.node_count(),
            edges    = network.edge_count(),
            directed = network.is_directed(),
            "network built"
        );
        Ok(network)
    }
}
