//! Graph-subsystem error type.

use thiserror::Error;

use sn_core::{EdgeId, NodeId};

/// Errors produced by `sn-graph`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    #[error("node {0} not found in graph")]
    UnknownNode(NodeId),

    #[error("edge {0} not found in graph")]
    UnknownEdge(EdgeId),

    #[error("node {0} already exists in graph")]
    DuplicateNode(NodeId),

    #[error("edge {0} already exists in graph")]
    DuplicateEdge(EdgeId),

    #[error("edge {edge} has weight {weight}; weights must be finite and non-negative")]
    InvalidWeight { edge: EdgeId, weight: f64 },

    #[error("edge would loop on node {0}; this graph does not accept self-loops")]
    SelfLoop(NodeId),

    #[error("no path from {from} to {to}")]
    NoPath { from: NodeId, to: NodeId },
}

pub type GraphResult<T> = Result<T, GraphError>;
