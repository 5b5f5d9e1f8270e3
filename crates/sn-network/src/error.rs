//! Network error type.
//!
//! Errors from the two adapters convert into [`NetworkError`] so callers
//! match on one flat enum whatever layer detected the problem.

use std::fmt;

use thiserror::Error;

use sn_core::{ConfigError, EdgeId, NodeId};
use sn_geometry::GeometryError;
use sn_graph::GraphError;

/// Which end of an edge geometry failed the endpoint check.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EdgeEnd {
    Start,
    End,
}

impl fmt::Display for EdgeEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeEnd::Start => f.write_str("start"),
            EdgeEnd::End => f.write_str("end"),
        }
    }
}

/// Errors produced by `sn-network`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NetworkError {
    #[error("node {0} not found in network")]
    UnknownNode(NodeId),

    #[error("edge {0} not found in network")]
    UnknownEdge(EdgeId),

    #[error("node {0} already exists in network")]
    DuplicateNode(NodeId),

    #[error("edge {0} already exists in network")]
    DuplicateEdge(EdgeId),

    #[error("edge {edge} has weight {weight}; weights must be finite and non-negative")]
    InvalidWeight { edge: EdgeId, weight: f64 },

    #[error("node id {0:?} is reserved as the invalid sentinel")]
    ReservedNodeId(NodeId),

    #[error("edge id {0:?} is reserved as the invalid sentinel")]
    ReservedEdgeId(EdgeId),

    #[error("no unused {0} id is left to allocate")]
    IdsExhausted(&'static str),

    #[error(
        "geometry {end} of edge {from} -> {to} lies {gap} from the node coordinate \
         (tolerance {tolerance}); edge geometry must join its endpoint nodes"
    )]
    GeometryMismatch {
        from:      NodeId,
        to:        NodeId,
        end:       EdgeEnd,
        gap:       f64,
        tolerance: f64,
    },

    #[error("invalid geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("no path from {from} to {to}")]
    NoPath { from: NodeId, to: NodeId },

    #[error("detour ratio from {from} to {to} is undefined: the nodes coincide (flying distance 0)")]
    UndefinedRatio { from: NodeId, to: NodeId },

    #[error("edge would loop on node {0}; this network does not accept self-loops")]
    SelfLoop(NodeId),

    #[error("node {node} has {edges} incident edge(s); its coordinate can no longer change")]
    CoordinateLocked { node: NodeId, edges: usize },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<GraphError> for NetworkError {
    fn from(e: GraphError) -> Self {
        match e {
            GraphError::UnknownNode(n) => NetworkError::UnknownNode(n),
            GraphError::UnknownEdge(e) => NetworkError::UnknownEdge(e),
            GraphError::DuplicateNode(n) => NetworkError::DuplicateNode(n),
            GraphError::DuplicateEdge(e) => NetworkError::DuplicateEdge(e),
            GraphError::InvalidWeight { edge, weight } => NetworkError::InvalidWeight { edge, weight },
            GraphError::SelfLoop(n) => NetworkError::SelfLoop(n),
            GraphError::NoPath { from, to } => NetworkError::NoPath { from, to },
        }
    }
}

pub type NetworkResult<T> = Result<T, NetworkError>;
