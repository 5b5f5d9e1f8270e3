//! CSV network loader and writers.
//!
//! # CSV format
//!
//! Two files, one for nodes and one for edges.
//!
//! ```csv
//! id,x,y
//! 0,0.0,0.0
//! 1,3.0,0.0
//! 2,3.0,4.0
//! ```
//!
//! ```csv
//! id,from,to,weight
//! 0,0,1,
//! 1,1,2,12.5
//! ```
//!
//! An empty `weight` means "the edge's geometric length".  CSV carries no
//! geometry: every loaded edge is a straight line between its two nodes, and
//! exporting an edge with curved geometry keeps its weight but loses its
//! shape.  Attributes are not written either; use GeoJSON for a lossless
//! copy.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::Writer;
use serde::Deserialize;
use tracing::{debug, warn};

use sn_core::{EdgeId, NetworkConfig, NodeId};
use sn_network::{EdgeRecord, GeometryAdapter, GraphAdapter, NetworkBuilder, NodeRecord, SpatialNetwork};

use crate::IoResult;

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRow {
    id: NodeId,
    x:  f64,
    y:  f64,
}

#[derive(Deserialize)]
struct EdgeRow {
    id:     EdgeId,
    from:   NodeId,
    to:     NodeId,
    weight: Option<f64>,
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Load a network from a nodes CSV and an edges CSV.
pub fn load_network_csv(nodes: &Path, edges: &Path, config: NetworkConfig) -> IoResult<SpatialNetwork> {
    let nodes_file = File::open(nodes)?;
    let edges_file = File::open(edges)?;
    load_network_readers(nodes_file, edges_file, config)
}

/// Like [`load_network_csv`] but accepts any `Read` sources.
///
/// Useful for testing (pass a `std::io::Cursor`) or loading from network
/// streams.
pub fn load_network_readers<N: Read, E: Read>(
    nodes:  N,
    edges:  E,
    config: NetworkConfig,
) -> IoResult<SpatialNetwork> {
    let node_records = csv::Reader::from_reader(nodes)
        .deserialize::<NodeRow>()
        .map(|row| -> IoResult<NodeRecord> {
            let row = row?;
            Ok(NodeRecord::new(row.id, [row.x, row.y]))
        })
        .collect::<IoResult<Vec<_>>>()?;

    let edge_records = csv::Reader::from_reader(edges)
        .deserialize::<EdgeRow>()
        .map(|row| -> IoResult<EdgeRecord> {
            let row = row?;
            let mut record = EdgeRecord::new(row.id, row.from, row.to);
            record.weight = row.weight;
            Ok(record)
        })
        .collect::<IoResult<Vec<_>>>()?;

    debug!(nodes = node_records.len(), edges = edge_records.len(), "csv parsed");
    Ok(NetworkBuilder::new(config)
        .nodes(node_records)
        .edges(edge_records)
        .build()?)
}

// ── Writing ───────────────────────────────────────────────────────────────────

/// Write the `id,x,y` nodes file.
pub fn write_nodes_csv<S: GraphAdapter, G: GeometryAdapter>(
    path:    &Path,
    network: &SpatialNetwork<S, G>,
) -> IoResult<()> {
    write_nodes_writer(File::create(path)?, network)
}

/// Like [`write_nodes_csv`] but accepts any `Write` sink.
pub fn write_nodes_writer<W: Write, S: GraphAdapter, G: GeometryAdapter>(
    writer:  W,
    network: &SpatialNetwork<S, G>,
) -> IoResult<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(["id", "x", "y"])?;
    for node in network.nodes() {
        csv.write_record(&[
            node.id.0.to_string(),
            node.coordinate.x.to_string(),
            node.coordinate.y.to_string(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Write the `id,from,to,weight` edges file.  Every weight is written
/// explicitly.
pub fn write_edges_csv<S: GraphAdapter, G: GeometryAdapter>(
    path:    &Path,
    network: &SpatialNetwork<S, G>,
) -> IoResult<()> {
    write_edges_writer(File::create(path)?, network)
}

/// Like [`write_edges_csv`] but accepts any `Write` sink.
pub fn write_edges_writer<W: Write, S: GraphAdapter, G: GeometryAdapter>(
    writer:  W,
    network: &SpatialNetwork<S, G>,
) -> IoResult<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(["id", "from", "to", "weight"])?;

    let mut curved = 0usize;
    for edge in network.edges() {
        if edge.geometry.0.len() > 2 {
            curved += 1;
        }
        csv.write_record(&[
            edge.id.0.to_string(),
            edge.from.0.to_string(),
            edge.to.0.to_string(),
            edge.weight.to_string(),
        ])?;
    }
    csv.flush()?;

    if curved > 0 {
        warn!(curved, "edge geometry is not stored in CSV; curved edges will reload as straight lines");
    }
    Ok(())
}
